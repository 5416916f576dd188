use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Capability required to change the excluded categories.
pub const MANAGE_CATALOG: &str = "manage_catalog";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Actor ID
    pub email: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

impl Claims {
    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Generate a JWT access token for an actor
    pub fn generate_token(
        &self,
        subject: &str,
        email: &str,
        capabilities: &[&str],
        expiration_hours: i64,
    ) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}
