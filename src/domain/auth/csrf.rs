//! Anti-forgery tokens for state-changing admin requests.
//!
//! A token is `base64url(issued_at || HMAC-SHA256(secret, action|subject|issued_at))`,
//! so it is bound to one action and one actor and expires after a TTL.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Action name carried by the exclusions save form.
pub const SAVE_EXCLUSIONS_ACTION: &str = "save-exclusions";

const TIMESTAMP_LEN: usize = 8;
const MAC_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CsrfError {
    #[error("token missing")]
    Missing,
    #[error("token malformed")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("token does not match")]
    Mismatch,
}

impl From<CsrfError> for AppError {
    fn from(err: CsrfError) -> Self {
        AppError::ForgeryCheckFailed(err.to_string())
    }
}

#[derive(Clone)]
pub struct CsrfManager {
    secret: Vec<u8>,
    ttl: Duration,
}

impl CsrfManager {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl,
        }
    }

    /// Issue a token for `action` performed by `subject`
    pub fn generate(&self, action: &str, subject: &str) -> String {
        self.generate_at(action, subject, Utc::now())
    }

    pub fn generate_at(&self, action: &str, subject: &str, now: DateTime<Utc>) -> String {
        let issued_at = now.timestamp();
        let mac = self.sign(action, subject, issued_at);

        let mut bytes = Vec::with_capacity(TIMESTAMP_LEN + MAC_LEN);
        bytes.extend_from_slice(&issued_at.to_be_bytes());
        bytes.extend_from_slice(&mac);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Check a submitted token
    pub fn validate(&self, token: Option<&str>, action: &str, subject: &str) -> Result<(), CsrfError> {
        self.validate_at(token, action, subject, Utc::now())
    }

    pub fn validate_at(
        &self,
        token: Option<&str>,
        action: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CsrfError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(CsrfError::Missing)?;

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CsrfError::Malformed)?;
        if bytes.len() != TIMESTAMP_LEN + MAC_LEN {
            return Err(CsrfError::Malformed);
        }

        let (timestamp, mac) = bytes.split_at(TIMESTAMP_LEN);
        let mut raw_timestamp = [0u8; TIMESTAMP_LEN];
        raw_timestamp.copy_from_slice(timestamp);
        let issued_at = i64::from_be_bytes(raw_timestamp);

        self.mac_for(action, subject, issued_at)
            .verify_slice(mac)
            .map_err(|_| CsrfError::Mismatch)?;

        let age = now.timestamp() - issued_at;
        if age < 0 || age > self.ttl.num_seconds() {
            return Err(CsrfError::Expired);
        }

        Ok(())
    }

    fn mac_for(&self, action: &str, subject: &str, issued_at: i64) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(action.as_bytes());
        mac.update(b"|");
        mac.update(subject.as_bytes());
        mac.update(b"|");
        mac.update(issued_at.to_string().as_bytes());
        mac
    }

    fn sign(&self, action: &str, subject: &str, issued_at: i64) -> Vec<u8> {
        self.mac_for(action, subject, issued_at)
            .finalize()
            .into_bytes()
            .to_vec()
    }
}
