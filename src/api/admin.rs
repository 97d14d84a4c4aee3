use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::MongoDB,
    models::{AdminStats, CategorySales},
    services::stats_service,
};

#[utoipa::path(
    get,
    path = "/api/admin-stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Totals and revenue", body = AdminStats),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_admin_stats(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📊 GET /api/admin-stats");

    match stats_service::admin_stats(&db).await {
        Ok(stats) => {
            log::info!(
                "✅ Stats: {} users, {} orders, revenue {:.2}",
                stats.users,
                stats.orders,
                stats.revenue
            );
            HttpResponse::Ok().json(stats)
        }
        Err(e) => {
            log::error!("❌ Error computing admin stats: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin-chart",
    tag = "Admin",
    responses(
        (status = 200, description = "Quantity and revenue per menu category", body = [CategorySales])
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_admin_chart(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📈 GET /api/admin-chart");

    match stats_service::category_sales(&db).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("❌ Error computing category sales: {}", e);
            e.error_response()
        }
    }
}
