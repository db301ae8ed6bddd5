//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the UniTalk client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g. "http://localhost:8000/api_backend").
    pub base_url: String,

    /// Path of the login token exchange endpoint.
    pub token_path: String,

    /// Path of the credential renewal endpoint, consumed by the pipeline.
    pub refresh_path: String,

    /// Path of the registration endpoint.
    pub register_path: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Where the file-backed credential store lives. `None` means
    /// credentials live in memory only and die with the process.
    pub credentials_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api_backend".to_string(),
            token_path: "/token/".to_string(),
            refresh_path: "/token/refresh/".to_string(),
            register_path: "/register/".to_string(),
            request_timeout_secs: 30,
            credentials_file: None,
        }
    }
}
