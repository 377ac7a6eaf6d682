use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use crate::config::JwtConfig;

/// HS256 token issue/verify. The secret and lifetime come from config; the
/// lifetime is fixed at issuance (7 days by default), with no refresh path.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject (user id)
    pub sub: String,
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiry_days: config.expiry_days,
        }
    }

    pub fn generate_token(&self, user_id: &str, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + Duration::days(self.expiry_days);

        let claims = AuthClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to encode token: {}", e)))?;

        Ok(token)
    }

    /// Verify signature and expiry. Expired tokens and malformed/invalid ones
    /// both come back Unauthorized, with distinct messages.
    pub fn validate_token(&self, token: &str) -> Result<AuthClaims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<AuthClaims>(token, &self.decoding_key, &validation)
            .map_err(AppError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "unit-test-secret".to_string(),
            expiry_days: 7,
        })
    }

    #[test]
    fn token_round_trip() {
        let jwt = service();
        let token = jwt.generate_token("user-123", "owner@example.com").unwrap();
        assert!(!token.is_empty());

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "owner@example.com");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let jwt = service();
        // Encode a token whose exp is well past the default validation leeway.
        let now = Utc::now().timestamp();
        let claims = AuthClaims {
            sub: "user-123".to_string(),
            email: "owner@example.com".to_string(),
            exp: now - 600,
            iat: now - 700,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        let err = jwt.validate_token(&token).unwrap_err();
        match err {
            AppError::InvalidToken(e) => assert!(matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            )),
            other => panic!("expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn garbage_token_is_rejected() {
        let jwt = service();
        assert!(jwt.validate_token("not-a-token").is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let jwt = service();
        let other = JwtService::new(&JwtConfig {
            secret: "different-secret".to_string(),
            expiry_days: 7,
        });
        let token = other.generate_token("user-123", "owner@example.com").unwrap();
        assert!(jwt.validate_token(&token).is_err());
    }
}
