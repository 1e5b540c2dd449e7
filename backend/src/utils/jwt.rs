//! JWT token utilities for authentication.
//!
//! Provides token creation, validation, and unsigned decoding for the bearer
//! tokens handed out on login.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::auth::traits::TokenIssuer;
use crate::errors::ServiceError;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    insecure_validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from an explicit secret and lifetime.
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let mut insecure_validation = Validation::new(Algorithm::HS256);
        insecure_validation.insecure_disable_signature_validation();
        insecure_validation.validate_exp = false;
        insecure_validation.required_spec_claims.clear();

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            insecure_validation,
            expires_in_seconds,
        }
    }

    /// Generate a new JWT token for a user
    pub fn generate_token(&self, user_id: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(Duration::try_seconds)
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

        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, ServiceError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::validation(format!("Token validation failed: {}", e)))
    }
}

impl TokenIssuer for JwtUtils {
    fn create(&self, subject_id: &str) -> Result<String, ServiceError> {
        self.generate_token(subject_id)
    }

    fn decode(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.insecure_validation) {
            Ok(token_data) => Some(token_data.claims),
            Err(e) => {
                tracing::debug!("Can't decode token: {}", e);
                None
            }
        }
    }

    fn verify(&self, token: &str) -> Option<Claims> {
        match self.validate_token(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        }
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}
