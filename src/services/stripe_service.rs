use crate::utils::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;

pub const PAYMENT_CURRENCY: &str = "usd";

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates an intent for `amount` minor units and returns its client secret.
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<String, AppError>;
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(api_base: &str, secret_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<String, AppError> {
        log::info!("💳 Creating payment intent: {} {}", amount, currency);

        let url = format!("{}/v1/payment_intents", self.api_base);
        let amount = amount.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::GatewayError(format!("Failed to reach Stripe: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| status.to_string());
            return Err(AppError::GatewayError(message));
        }

        let intent: StripePaymentIntent = response
            .json()
            .await
            .map_err(|e| AppError::GatewayError(format!("Failed to parse Stripe response: {}", e)))?;

        log::info!("✅ Payment intent created: {}", intent.id);

        intent
            .client_secret
            .ok_or_else(|| AppError::GatewayError("payment intent has no client secret".to_string()))
    }
}

/// Converts a decimal price to integer cents, rounding to the nearest cent.
pub fn to_minor_units(price: f64) -> Result<i64, AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::InvalidRequest(format!("invalid price: {}", price)));
    }
    Ok((price * 100.0).round() as i64)
}
