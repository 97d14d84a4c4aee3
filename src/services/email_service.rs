use crate::{config::MailConfig, models::NewPayment, utils::error::AppError};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError>;
}

/// Sends through the Mailgun messages API.
pub struct MailgunMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl MailgunMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for MailgunMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        let url = format!(
            "{}/v3/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            self.config.domain
        );
        let form = [
            ("from", self.config.from.as_str()),
            ("to", message.to.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.text.as_str()),
            ("html", message.html.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(&self.config.api_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::EmailError(format!("Failed to reach Mailgun: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::EmailError(format!("Mailgun error {}: {}", status, body)));
        }

        Ok(())
    }
}

/// Used when no mail credentials are configured.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        log::info!("📭 Email disabled, not sending '{}' to {}", message.subject, message.to);
        Ok(())
    }
}

pub fn payment_confirmation(payment: &NewPayment) -> EmailMessage {
    let items = payment.menu_item_ids.len();
    EmailMessage {
        to: payment.email.clone(),
        subject: "Bistro Boss Order Confirmation".to_string(),
        text: format!(
            "Thank you for your order. Transaction {} for ${:.2} ({} item(s)) has been received.",
            payment.transaction_id, payment.price, items
        ),
        html: format!(
            "<div>\
             <h2>Thank you for your order</h2>\
             <h4>Your Transaction Id: <strong>{}</strong></h4>\
             <p>Total paid: ${:.2} for {} item(s).</p>\
             <p>We would like to get your feedback about the food.</p>\
             </div>",
            payment.transaction_id, payment.price, items
        ),
    }
}

/// Fire-and-forget send. The request path never awaits the returned handle.
pub fn dispatch(mailer: Arc<dyn Mailer>, message: EmailMessage) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match mailer.send(&message).await {
            Ok(()) => log::info!("📧 Confirmation email sent to {}", message.to),
            Err(e) => log::error!("❌ Failed to send email to {}: {}", message.to, e),
        }
    })
}
