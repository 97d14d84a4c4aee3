mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::services::{DisabledMailer, Mailer, MailgunMailer, PaymentGateway, StripeGateway};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting Bistro Service...");
    log::info!("📊 Database: {}", config.database_name);

    let db = database::MongoDB::new(&config.database_url, &config.database_name)
        .await
        .map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to connect to MongoDB: {}", e),
            )
        })?;

    log::info!("✅ MongoDB connected successfully");

    let gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::new(
        &config.stripe_api_base,
        &config.stripe_secret_key,
    ));

    let mailer: Arc<dyn Mailer> = match config.mail.clone() {
        Some(mail) => {
            log::info!("📧 Mailgun enabled for domain {}", mail.domain);
            Arc::new(MailgunMailer::new(mail))
        }
        None => {
            log::warn!("⚠️  MAIL_GUN_API_KEY/MAIL_SENDING_DOMAIN not set, confirmation emails disabled");
            Arc::new(DisabledMailer)
        }
    };

    let host = config.host.clone();
    let port = config.port;

    let db_data = web::Data::new(db.clone());
    let config_data = web::Data::new(config);
    let gateway_data = web::Data::from(gateway);
    let mailer_data = web::Data::from(mailer);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .app_data(gateway_data.clone())
            .app_data(mailer_data.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    log::info!("🛑 Server stopped, closing MongoDB connections");
    db.shutdown().await;

    Ok(())
}
