use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::MongoDB,
    middleware::auth::Claims,
    models::{AdminCheckResponse, CreateUserResponse, DeleteResponse, NewUser, Role, UpdateResponse, User},
    services::user_service,
    utils::error::AppError,
};

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("👥 GET /api/users");

    match user_service::list_users(&db).await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 200, description = "Inserted, or `insertedId: null` when the email exists", body = CreateUserResponse)
    )
)]
pub async fn create_user(db: web::Data<MongoDB>, request: web::Json<NewUser>) -> HttpResponse {
    log::info!("📝 POST /api/users - email: {}", request.email);

    match user_service::create_user(&db, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error creating user: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/user/admin/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Role updated", body = UpdateResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn make_admin(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🔧 PATCH /api/user/admin/{}", id);

    match user_service::make_admin(&db, &id).await {
        Ok(result) => {
            log::info!("✅ User {} promoted ({} modified)", id, result.modified_count);
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            log::error!("❌ Error promoting user {}: {}", id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Delete result", body = DeleteResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /api/users/{}", id);

    match user_service::delete_user(&db, &id).await {
        Ok(result) => {
            log::info!("✅ User {} deleted ({})", id, result.deleted_count);
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            log::error!("❌ Error deleting user {}: {}", id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/user/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Must match the token's email")),
    responses(
        (status = 200, description = "Admin flag for the caller", body = AdminCheckResponse),
        (status = 403, description = "Email does not belong to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_admin(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    email: web::Path<String>,
) -> HttpResponse {
    log::info!("🔎 GET /api/user/admin/{}", email);

    if email.as_str() != user.email {
        log::warn!("⛔ {} asked for admin status of {}", user.email, email);
        return AppError::Forbidden.error_response();
    }

    match user_service::find_role(&db, &email).await {
        Ok(role) => HttpResponse::Ok().json(AdminCheckResponse {
            is_admin: role == Role::Admin,
        }),
        Err(e) => {
            log::error!("❌ Error checking role for {}: {}", email, e);
            e.error_response()
        }
    }
}
