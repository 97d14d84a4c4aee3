use actix_web::{web, HttpResponse, ResponseError};

use crate::{database::MongoDB, models::Review, services::review_service};

#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "All reviews", body = [Review])
    )
)]
pub async fn get_reviews(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("⭐ GET /api/reviews");

    match review_service::list_reviews(&db).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(e) => {
            log::error!("❌ Error listing reviews: {}", e);
            e.error_response()
        }
    }
}
