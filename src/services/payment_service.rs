use crate::{
    database::{MongoDB, CARTS, PAYMENTS},
    models::{NewPayment, Payment, PaymentIntentResponse, PaymentRecordResponse},
    services::{
        email_service::{self, Mailer},
        stripe_service::{self, PaymentGateway, PAYMENT_CURRENCY},
    },
    utils::{error::AppError, ids::parse_object_ids},
};
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use std::sync::Arc;

pub async fn create_payment_intent(
    gateway: &dyn PaymentGateway,
    price: f64,
) -> Result<PaymentIntentResponse, AppError> {
    let amount = stripe_service::to_minor_units(price)?;
    let client_secret = gateway.create_payment_intent(amount, PAYMENT_CURRENCY).await?;
    Ok(PaymentIntentResponse { client_secret })
}

/// Stores the payment, clears the carts it paid for and queues a confirmation email.
///
/// Cart cleanup is a plain `delete_many`, not a transaction. The email goes out on a
/// detached task, so its outcome never affects the response.
pub async fn record_payment(
    db: &MongoDB,
    mailer: Arc<dyn Mailer>,
    payment: NewPayment,
) -> Result<PaymentRecordResponse, AppError> {
    let payment = payment.with_defaults(Utc::now());

    let insert = db
        .collection::<NewPayment>(PAYMENTS)
        .insert_one(&payment)
        .await?;

    let cart_ids = parse_object_ids(&payment.cart_ids);
    let delete = db
        .collection::<mongodb::bson::Document>(CARTS)
        .delete_many(doc! { "_id": { "$in": cart_ids } })
        .await?;

    log::info!(
        "🧹 Removed {} of {} cart items for {}",
        delete.deleted_count,
        payment.cart_ids.len(),
        payment.email
    );

    email_service::dispatch(mailer, email_service::payment_confirmation(&payment));

    Ok(PaymentRecordResponse {
        payment_result: insert.into(),
        delete_result: delete.into(),
    })
}

pub async fn list_payments(db: &MongoDB, email: &str) -> Result<Vec<Payment>, AppError> {
    let cursor = db
        .collection::<Payment>(PAYMENTS)
        .find(doc! { "email": email })
        .sort(doc! { "date": -1 })
        .await?;
    Ok(cursor.try_collect().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email_service::EmailMessage;
    use async_trait::async_trait;

    struct FixedGateway;

    #[async_trait]
    impl PaymentGateway for FixedGateway {
        async fn create_payment_intent(
            &self,
            amount: i64,
            currency: &str,
        ) -> Result<String, AppError> {
            Ok(format!("pi_secret_{}_{}", amount, currency))
        }
    }

    struct NullMailer;

    #[async_trait]
    impl Mailer for NullMailer {
        async fn send(&self, _message: &EmailMessage) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[actix_web::test]
    async fn test_intent_amount_is_in_cents() {
        let response = create_payment_intent(&FixedGateway, 12.34).await.unwrap();
        assert_eq!(response.client_secret, "pi_secret_1234_usd");
    }

    #[actix_web::test]
    async fn test_intent_rejects_zero_price() {
        let result = create_payment_intent(&FixedGateway, 0.0).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_paid_carts_are_removed() {
        use crate::models::NewCartItem;

        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "bistro_payment_service_test").await.unwrap();
        let email = format!("{}@bistro.test", uuid::Uuid::new_v4());

        let carts = db.collection::<NewCartItem>(CARTS);
        let mut cart_ids = Vec::new();
        for price in [8.5, 11.0] {
            let item = NewCartItem {
                user_email: email.clone(),
                menu_id: "642c155b2c4774f05c36eeaa".to_string(),
                name: "Soup".to_string(),
                image: String::new(),
                price,
            };
            let inserted = carts.insert_one(&item).await.unwrap();
            cart_ids.push(inserted.inserted_id.as_object_id().unwrap().to_hex());
        }

        let payment = NewPayment {
            email: email.clone(),
            price: 19.5,
            transaction_id: "pi_test".to_string(),
            date: None,
            cart_ids: cart_ids.clone(),
            menu_item_ids: vec!["642c155b2c4774f05c36eeaa".to_string(); 2],
            status: None,
        };
        let response = record_payment(&db, Arc::new(NullMailer), payment)
            .await
            .unwrap();

        assert_eq!(response.delete_result.deleted_count, 2);
        let remaining = db
            .collection::<mongodb::bson::Document>(CARTS)
            .count_documents(doc! { "userEmail": &email })
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        let payments = list_payments(&db, &email).await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].cart_ids, cart_ids);
        assert_eq!(payments[0].status.as_deref(), Some("pending"));
    }
}
