use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub user_email: String,
    #[serde(default)]
    pub menu_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub user_email: String,
    pub menu_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CartQuery {
    /// Cart owner, must match the token's email
    pub email: String,
}
