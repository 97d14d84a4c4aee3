use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize, Serializer};

use super::{DeleteResponse, InsertResponse};

pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub email: String,
    pub price: f64,
    pub transaction_id: String,
    /// Read back from a BSON datetime, rendered to clients as RFC 3339.
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub cart_ids: Vec<String>,
    #[serde(default)]
    pub menu_item_ids: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub email: String,
    pub price: f64,
    pub transaction_id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_date_as_bson"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cart_ids: Vec<String>,
    #[serde(default)]
    pub menu_item_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// Stored as a BSON datetime so history sorts chronologically.
fn serialize_date_as_bson<S: Serializer>(
    date: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => chrono_datetime_as_bson_datetime::serialize(date, serializer),
        None => serializer.serialize_none(),
    }
}

impl NewPayment {
    /// Fills server-side defaults before the record is stored.
    pub fn with_defaults(mut self, now: DateTime<Utc>) -> Self {
        if self.date.is_none() {
            self.date = Some(now);
        }
        if self.status.is_none() {
            self.status = Some(DEFAULT_PAYMENT_STATUS.to_string());
        }
        self
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordResponse {
    pub payment_result: InsertResponse,
    pub delete_result: DeleteResponse,
}
