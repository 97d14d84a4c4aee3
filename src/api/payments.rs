use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::MongoDB,
    middleware::auth::Claims,
    models::{NewPayment, Payment, PaymentIntentRequest, PaymentIntentResponse, PaymentRecordResponse},
    services::{payment_service, Mailer, PaymentGateway},
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/api/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret of the new intent", body = PaymentIntentResponse),
        (status = 400, description = "Price is not positive"),
        (status = 502, description = "Payment gateway failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_payment_intent(
    user: web::ReqData<Claims>,
    gateway: web::Data<dyn PaymentGateway>,
    request: web::Json<PaymentIntentRequest>,
) -> HttpResponse {
    log::info!("💳 POST /api/create-payment-intent - {} for {}", request.price, user.email);

    match payment_service::create_payment_intent(gateway.get_ref(), request.price).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Payment intent failed for {}: {}", user.email, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    request_body = NewPayment,
    responses(
        (status = 200, description = "Payment stored and paid carts removed", body = PaymentRecordResponse),
        (status = 403, description = "Payment email does not belong to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn record_payment(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    mailer: web::Data<dyn Mailer>,
    request: web::Json<NewPayment>,
) -> HttpResponse {
    log::info!(
        "💰 POST /api/payments - {} paid {} ({} cart items)",
        request.email,
        request.price,
        request.cart_ids.len()
    );

    if request.email != user.email {
        log::warn!("⛔ {} tried to record a payment for {}", user.email, request.email);
        return AppError::Forbidden.error_response();
    }

    match payment_service::record_payment(&db, mailer.into_inner(), request.into_inner()).await {
        Ok(response) => {
            log::info!(
                "✅ Payment recorded: {:?}, {} cart items removed",
                response.payment_result.inserted_id,
                response.delete_result.deleted_count
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Error recording payment: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/payments/{email}",
    tag = "Payments",
    params(("email" = String, Path, description = "Must match the token's email")),
    responses(
        (status = 200, description = "Payment history, newest first", body = [Payment]),
        (status = 403, description = "Email does not belong to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_payments(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    email: web::Path<String>,
) -> HttpResponse {
    log::info!("📜 GET /api/payments/{}", email);

    if email.as_str() != user.email {
        log::warn!("⛔ {} asked for payments of {}", user.email, email);
        return AppError::Forbidden.error_response();
    }

    match payment_service::list_payments(&db, &email).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => {
            log::error!("❌ Error listing payments for {}: {}", email, e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{bearer, test_app};
    use crate::models::PaymentIntentResponse;
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    #[actix_web::test]
    async fn test_payment_intent_uses_gateway() {
        let app = test::init_service(test_app().await).await;

        let req = test::TestRequest::post()
            .uri("/api/create-payment-intent")
            .insert_header(bearer("diner@bistro.test"))
            .set_json(json!({ "price": 25.5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: PaymentIntentResponse = test::read_body_json(resp).await;
        assert_eq!(body.client_secret, "secret_2550_usd");
    }

    #[actix_web::test]
    async fn test_payment_intent_rejects_zero_price() {
        let app = test::init_service(test_app().await).await;

        let req = test::TestRequest::post()
            .uri("/api/create-payment-intent")
            .insert_header(bearer("diner@bistro.test"))
            .set_json(json!({ "price": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_foreign_payment_history_is_forbidden() {
        let app = test::init_service(test_app().await).await;

        let req = test::TestRequest::get()
            .uri("/api/payments/owner@bistro.test")
            .insert_header(bearer("intruder@bistro.test"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_payment_for_someone_else_is_forbidden() {
        let app = test::init_service(test_app().await).await;

        let req = test::TestRequest::post()
            .uri("/api/payments")
            .insert_header(bearer("intruder@bistro.test"))
            .set_json(json!({
                "email": "owner@bistro.test",
                "price": 10.0,
                "transactionId": "pi_1",
                "cartIds": [],
                "menuItemIds": []
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
