pub mod auth_service;
pub mod cart_service;
pub mod email_service;
pub mod menu_service;
pub mod payment_service;
pub mod review_service;
pub mod stats_service;
pub mod stripe_service;
pub mod user_service;

pub use email_service::{Mailer, MailgunMailer, DisabledMailer};
pub use stripe_service::{PaymentGateway, StripeGateway};
