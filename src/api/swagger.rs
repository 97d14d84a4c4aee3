use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bistro Boss API",
        version = "1.0.0",
        description = "Restaurant ordering backend: menu, reviews, carts, users and payments.\n\n**Authentication:** obtain a token from `POST /api/jwt` and send it as `Authorization: Bearer <token>`. Admin routes additionally require the caller's stored role to be `admin`."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_token,

        // Menu
        crate::api::menus::get_menu,
        crate::api::menus::get_menu_item,
        crate::api::menus::create_menu_item,
        crate::api::menus::update_menu_item,
        crate::api::menus::delete_menu_item,

        // Reviews
        crate::api::reviews::get_reviews,

        // Users
        crate::api::users::get_users,
        crate::api::users::create_user,
        crate::api::users::make_admin,
        crate::api::users::delete_user,
        crate::api::users::check_admin,

        // Carts
        crate::api::carts::get_cart,
        crate::api::carts::add_to_cart,
        crate::api::carts::remove_from_cart,

        // Payments
        crate::api::payments::create_payment_intent,
        crate::api::payments::record_payment,
        crate::api::payments::get_payments,

        // Admin
        crate::api::admin::get_admin_stats,
        crate::api::admin::get_admin_chart,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::services::auth_service::TokenRequest,
            crate::services::auth_service::TokenResponse,
            crate::models::MenuItem,
            crate::models::NewMenuItem,
            crate::models::UpdateMenuItem,
            crate::models::Review,
            crate::models::User,
            crate::models::NewUser,
            crate::models::AdminCheckResponse,
            crate::models::CartItem,
            crate::models::NewCartItem,
            crate::models::Payment,
            crate::models::NewPayment,
            crate::models::PaymentIntentRequest,
            crate::models::PaymentIntentResponse,
            crate::models::PaymentRecordResponse,
            crate::models::AdminStats,
            crate::models::CategorySales,
            crate::models::InsertResponse,
            crate::models::UpdateResponse,
            crate::models::DeleteResponse,
            crate::models::CreateUserResponse,
            crate::models::UserExistsResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database connectivity."),
        (name = "Auth", description = "Access token issuance."),
        (name = "Menu", description = "Menu catalog. Writes are admin only."),
        (name = "Reviews", description = "Customer reviews, read only."),
        (name = "Users", description = "User registry and admin role management."),
        (name = "Carts", description = "Per-user cart items."),
        (name = "Payments", description = "Stripe payment intents and recorded payments."),
        (name = "Admin", description = "Reporting aggregates for the dashboard."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/jwt"))
                        .build(),
                ),
            );
        }
    }
}
