use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::MongoDB,
    middleware::auth::Claims,
    models::{CartItem, CartQuery, DeleteResponse, InsertResponse, NewCartItem},
    services::cart_service,
    utils::error::AppError,
};

#[utoipa::path(
    get,
    path = "/api/carts",
    tag = "Carts",
    params(CartQuery),
    responses(
        (status = 200, description = "Cart items of the caller", body = [CartItem]),
        (status = 403, description = "Email does not belong to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_cart(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<CartQuery>,
) -> HttpResponse {
    log::info!("🛒 GET /api/carts - email: {}", query.email);

    if query.email != user.email {
        log::warn!("⛔ {} asked for the cart of {}", user.email, query.email);
        return AppError::Forbidden.error_response();
    }

    match cart_service::list_cart(&db, &query.email).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => {
            log::error!("❌ Error listing cart: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/carts",
    tag = "Carts",
    request_body = NewCartItem,
    responses(
        (status = 200, description = "Item added", body = InsertResponse),
        (status = 403, description = "userEmail does not belong to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_to_cart(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<NewCartItem>,
) -> HttpResponse {
    log::info!("🛒 POST /api/carts - {} for {}", request.name, request.user_email);

    if request.user_email != user.email {
        log::warn!("⛔ {} tried to fill the cart of {}", user.email, request.user_email);
        return AppError::Forbidden.error_response();
    }

    match cart_service::add_to_cart(&db, request.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error adding to cart: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/carts/{id}",
    tag = "Carts",
    params(("id" = String, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Delete result", body = DeleteResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_from_cart(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> HttpResponse {
    log::info!("🗑️  DELETE /api/carts/{} - {}", id, user.email);

    match cart_service::remove_from_cart(&db, &id, &user.email).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error removing cart item {}: {}", id, e);
            e.error_response()
        }
    }
}
