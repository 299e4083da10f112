//! JWT token utilities for authentication.
//!
//! Provides token creation and validation for users who have registered or
//! logged in. Tokens are HS256-signed and carry the user id as `sub`.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Signs and checks bearer tokens bound to a user identifier.
pub trait TokenIssuer: Send + Sync {
    /// Returns a signed, time-bound token whose subject is `user_id`.
    fn issue(&self, user_id: &str) -> ServiceResult<String>;

    /// Verifies signature and expiry and returns the decoded claims.
    fn validate(&self, token: &str) -> ServiceResult<Claims>;
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the configured secret and lifetime
    pub fn new(config: &Config) -> Self {
        Self::with_secret(config.jwt_secret.as_bytes(), config.jwt_expires_in_seconds)
    }

    pub fn with_secret(secret: &[u8], expires_in_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            expires_in_seconds,
        }
    }

    /// Generate a new JWT token for the user
    pub fn generate_token(&self, user_id: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ServiceError::internal_error(format!(
                    "Token lifetime of {} seconds is out of range",
                    self.expires_in_seconds
                ))
            })?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::validation(format!("Token validation failed: {}", e)))
    }
}

impl TokenIssuer for JwtUtils {
    fn issue(&self, user_id: &str) -> ServiceResult<String> {
        self.generate_token(user_id)
    }

    fn validate(&self, token: &str) -> ServiceResult<Claims> {
        self.validate_token(token)
    }
}
