use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE: &str = "bistroBossDB";
const DEFAULT_CLUSTER: &str = "cluster0.0m3jt.mongodb.net";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_MAILGUN_API_BASE: &str = "https://api.mailgun.net";

/// Mailgun settings. Absent when the key or sending domain is not configured.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub domain: String,
    pub from: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, String> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{} must be set", key))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("PORT is not a valid port ({}): {}", raw, e))?,
            None => DEFAULT_PORT,
        };

        // Full URI wins; otherwise build the Atlas URI from credentials
        let database_url = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => url,
            None => {
                let user = required("DB_USER")
                    .map_err(|_| "DATABASE_URL or DB_USER/DB_PASS must be set".to_string())?;
                let pass = required("DB_PASS")
                    .map_err(|_| "DATABASE_URL or DB_USER/DB_PASS must be set".to_string())?;
                let cluster = lookup("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
                format!(
                    "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=Cluster0",
                    user, pass, cluster
                )
            }
        };

        let mail = match (lookup("MAIL_GUN_API_KEY"), lookup("MAIL_SENDING_DOMAIN")) {
            (Some(api_key), Some(domain)) if !api_key.is_empty() && !domain.is_empty() => {
                let from = lookup("MAIL_FROM")
                    .unwrap_or_else(|| format!("Bistro Boss <mailgun@{}>", domain));
                Some(MailConfig {
                    api_key,
                    domain,
                    from,
                    api_base: lookup("MAILGUN_API_BASE")
                        .unwrap_or_else(|| DEFAULT_MAILGUN_API_BASE.to_string()),
                })
            }
            _ => None,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url,
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            jwt_secret: required("ACCESS_TOKEN_SECRET")?,
            stripe_secret_key: required("STRIPE_SECRET_KEY")?,
            stripe_api_base: lookup("STRIPE_API_BASE")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
            mail,
        })
    }
}
