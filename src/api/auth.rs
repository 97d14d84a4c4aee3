use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    config::AppConfig,
    services::auth_service::{self, TokenRequest, TokenResponse},
};

#[utoipa::path(
    post,
    path = "/api/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed access token, valid for one day", body = TokenResponse)
    )
)]
pub async fn issue_token(
    config: web::Data<AppConfig>,
    request: web::Json<TokenRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /api/jwt - email: {}", request.email);

    match auth_service::generate_jwt(&request.email, &config.jwt_secret) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse { token }),
        Err(e) => {
            log::error!("❌ Token generation failed: {}", e);
            e.error_response()
        }
    }
}
