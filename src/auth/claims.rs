//! Access credential decoding.
//!
//! The backend issues compact three-part tokens
//! (`header.payload.signature`). Only the payload segment is decoded
//! here; signature verification is the issuing server's responsibility.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Account role embedded in the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Faculty => write!(f, "faculty"),
        }
    }
}

/// Claims carried in the access credential's payload segment.
///
/// Field names follow the backend's claim set (`user_id`, `username`,
/// `user_type`, `exp`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    #[serde(rename = "user_id")]
    pub subject_id: u64,

    #[serde(rename = "username")]
    pub display_name: String,

    #[serde(rename = "user_type")]
    pub role: Role,

    /// Expiry as fractional Unix seconds.
    #[serde(rename = "exp")]
    pub expires_at: f64,
}

impl Claims {
    /// Expiry boundary: a credential expiring exactly `now` is already
    /// expired; strictly later is valid.
    pub fn is_expired_at(&self, now: f64) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }
}

/// Errors from decoding a raw credential string.
///
/// Every failure mode yields an error, never a partial claims record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not exactly three dot-separated segments.
    #[error("credential is not a three-segment token")]
    MalformedToken,

    /// Payload segment is not valid base64url.
    #[error("credential payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Payload decodes but is not a well-formed claims object.
    #[error("credential payload is not a valid claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the claims payload of a raw access credential.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(DecodeError::MalformedToken);
    };

    // Tolerate padded variants; the standard form is unpadded.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Current time as fractional Unix seconds.
pub(crate) fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Build an unsigned token around the given payload. Test helper only;
/// the signature segment is junk, which is fine because it is never read.
#[cfg(test)]
pub(crate) fn encode_unsigned(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{header}.{body}.sig")
}
