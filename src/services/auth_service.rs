use crate::{middleware::auth::Claims, utils::error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens are valid for one day.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// Generate JWT token
pub fn generate_jwt(email: &str, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token (signature + expiry)
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            log::debug!("Invalid token: {}", e);
            AppError::Unauthorized
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_carries_email_and_expiry() {
        let token = generate_jwt("diner@bistro.test", "secret").unwrap();
        let claims = verify_token(&token, "secret").unwrap();

        assert_eq!(claims.email, "diner@bistro.test");
        assert_eq!(claims.exp - claims.iat, (TOKEN_TTL_HOURS * 3600) as usize);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = generate_jwt("diner@bistro.test", "secret").unwrap();
        assert!(matches!(
            verify_token(&token, "not-the-secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let past = Utc::now() - Duration::hours(48);
        let claims = Claims {
            email: "late@bistro.test".to_string(),
            iat: past.timestamp() as usize,
            exp: (past + Duration::hours(1)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(verify_token(&token, "secret").is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(verify_token("not.a.jwt", "secret").is_err());
    }
}
