//! Pipeline error definitions.

use thiserror::Error;

/// Errors surfaced to pipeline callers.
///
/// The pipeline only ever intervenes on the 401 case; everything else
/// propagates to the caller untouched.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client construction failed (bad base URL or HTTP client setup).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Network or protocol failure on the caller's own request.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request path could not be joined onto the base URL.
    #[error("invalid request path `{0}`")]
    InvalidPath(String),

    /// Still unauthorized after the single credential renewal.
    #[error("request unauthorized after credential renewal")]
    Unauthorized,

    /// Credential renewal failed or was impossible; the session has
    /// been torn down.
    #[error("session expired: {0}")]
    SessionExpired(String),

    /// Non-2xx response where the typed layer expected a payload.
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },

    /// A 2xx body that did not deserialize as expected.
    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}
