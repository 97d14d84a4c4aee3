pub mod admin;
pub mod auth;
pub mod carts;
pub mod health;
pub mod menus;
pub mod payments;
pub mod reviews;
pub mod swagger;
pub mod users;

use actix_web::{web, Route};

use crate::middleware::{AdminGuard, AuthMiddleware};

/// Token required.
fn authed(route: Route) -> Route {
    route.wrap(AuthMiddleware)
}

/// Token required and the caller's stored role must be admin.
fn admin(route: Route) -> Route {
    route.wrap(AdminGuard).wrap(AuthMiddleware)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::liveness))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                // Auth
                .route("/jwt", web::post().to(auth::issue_token))
                // Menu
                .route("/menus", web::get().to(menus::get_menu))
                .route("/menus", admin(web::post().to(menus::create_menu_item)))
                .route("/menus/{id}", web::get().to(menus::get_menu_item))
                .route("/menus/{id}", admin(web::patch().to(menus::update_menu_item)))
                .route("/menus/{id}", admin(web::delete().to(menus::delete_menu_item)))
                // Reviews
                .route("/reviews", web::get().to(reviews::get_reviews))
                // Users
                .route("/users", admin(web::get().to(users::get_users)))
                .route("/users", web::post().to(users::create_user))
                .route("/user/admin/{id}", admin(web::patch().to(users::make_admin)))
                .route("/users/admin/{id}", admin(web::patch().to(users::make_admin)))
                .route("/users/admin/{id}", admin(web::delete().to(users::delete_user)))
                .route("/users/{id}", admin(web::delete().to(users::delete_user)))
                .route("/user/admin/{email}", authed(web::get().to(users::check_admin)))
                // Carts
                .route("/carts", authed(web::get().to(carts::get_cart)))
                .route("/carts", authed(web::post().to(carts::add_to_cart)))
                .route("/carts/{id}", authed(web::delete().to(carts::remove_from_cart)))
                // Payments
                .route(
                    "/create-payment-intent",
                    authed(web::post().to(payments::create_payment_intent)),
                )
                .route("/payments", authed(web::post().to(payments::record_payment)))
                .route("/payments/{email}", authed(web::get().to(payments::get_payments)))
                // Reporting
                .route("/admin-stats", admin(web::get().to(admin::get_admin_stats)))
                .route("/admin-chart", admin(web::get().to(admin::get_admin_chart))),
        );
}

#[cfg(test)]
pub mod test_support {
    use std::sync::Arc;

    use actix_web::{web, App};
    use async_trait::async_trait;

    use crate::{
        config::AppConfig,
        database::MongoDB,
        services::{auth_service, email_service::EmailMessage, Mailer, PaymentGateway},
        utils::error::AppError,
    };

    pub const TEST_SECRET: &str = "bistro-test-secret";

    pub struct FakeGateway;

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_payment_intent(
            &self,
            amount: i64,
            currency: &str,
        ) -> Result<String, AppError> {
            Ok(format!("secret_{}_{}", amount, currency))
        }
    }

    pub struct NullMailer;

    #[async_trait]
    impl Mailer for NullMailer {
        async fn send(&self, _message: &EmailMessage) -> Result<(), AppError> {
            Ok(())
        }
    }

    pub fn test_config(database_url: &str) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: database_url.to_string(),
            database_name: "bistro_api_test".to_string(),
            jwt_secret: TEST_SECRET.to_string(),
            stripe_secret_key: "sk_test".to_string(),
            stripe_api_base: "http://127.0.0.1:1".to_string(),
            mail: None,
        }
    }

    pub fn bearer(email: &str) -> (&'static str, String) {
        let token = auth_service::generate_jwt(email, TEST_SECRET).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    fn app_with(
        config: AppConfig,
        db: MongoDB,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let gateway: Arc<dyn PaymentGateway> = Arc::new(FakeGateway);
        let mailer: Arc<dyn Mailer> = Arc::new(NullMailer);

        App::new()
            .app_data(web::Data::new(config))
            .app_data(web::Data::new(db))
            .app_data(web::Data::from(gateway))
            .app_data(web::Data::from(mailer))
            .configure(super::configure)
    }

    /// App over a database handle that never connects; for paths decided before any query.
    pub async fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let url = "mongodb://127.0.0.1:27017";
        let db = MongoDB::lazy(url, "bistro_api_test").await.unwrap();
        app_with(test_config(url), db)
    }

    pub async fn live_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        dotenv::dotenv().ok();
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&url, "bistro_api_test").await.unwrap();
        app_with(test_config(&url), db)
    }
}
