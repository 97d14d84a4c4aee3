use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::MongoDB,
    models::{DeleteResponse, InsertResponse, MenuItem, NewMenuItem, UpdateMenuItem, UpdateResponse},
    services::menu_service,
};

#[utoipa::path(
    get,
    path = "/api/menus",
    tag = "Menu",
    responses(
        (status = 200, description = "All menu items", body = [MenuItem])
    )
)]
pub async fn get_menu(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("🍽️ GET /api/menus");

    match menu_service::list_menu(&db).await {
        Ok(items) => {
            log::info!("✅ Listed {} menu items", items.len());
            HttpResponse::Ok().json(items)
        }
        Err(e) => {
            log::error!("❌ Error listing menu: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/menus/{id}",
    tag = "Menu",
    params(("id" = String, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item", body = MenuItem),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such item")
    )
)]
pub async fn get_menu_item(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🍽️ GET /api/menus/{}", id);

    match menu_service::get_menu_item(&db, &id).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(e) => {
            log::warn!("⚠️ Menu item {} unavailable: {}", id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/menus",
    tag = "Menu",
    request_body = NewMenuItem,
    responses(
        (status = 200, description = "Item inserted", body = InsertResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_menu_item(
    db: web::Data<MongoDB>,
    request: web::Json<NewMenuItem>,
) -> HttpResponse {
    log::info!("📝 POST /api/menus - {}", request.name);

    match menu_service::create_menu_item(&db, request.into_inner()).await {
        Ok(result) => {
            log::info!("✅ Menu item created: {:?}", result.inserted_id);
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            log::error!("❌ Error creating menu item: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/menus/{id}",
    tag = "Menu",
    params(("id" = String, Path, description = "Menu item id")),
    request_body = UpdateMenuItem,
    responses(
        (status = 200, description = "Update result", body = UpdateResponse),
        (status = 400, description = "Malformed id or empty update")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_menu_item(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    request: web::Json<UpdateMenuItem>,
) -> HttpResponse {
    log::info!("🔧 PATCH /api/menus/{}", id);

    match menu_service::update_menu_item(&db, &id, &request).await {
        Ok(result) => {
            log::info!("✅ Menu item {} updated ({} modified)", id, result.modified_count);
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            log::error!("❌ Error updating menu item {}: {}", id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/menus/{id}",
    tag = "Menu",
    params(("id" = String, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Delete result", body = DeleteResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_menu_item(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /api/menus/{}", id);

    match menu_service::delete_menu_item(&db, &id).await {
        Ok(result) => {
            log::info!("✅ Menu item {} deleted ({})", id, result.deleted_count);
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            log::error!("❌ Error deleting menu item {}: {}", id, e);
            e.error_response()
        }
    }
}
