//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Individual semantic validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("base_url `{0}` is not a valid URL")]
    BaseUrl(String),

    #[error("{name} `{value}` must start with '/'")]
    EndpointPath { name: &'static str, value: String },

    #[error("request_timeout_secs must be greater than zero")]
    Timeout,
}

/// Semantic checks on top of what serde already guarantees.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Url::parse(&config.base_url).is_err() {
        errors.push(ValidationError::BaseUrl(config.base_url.clone()));
    }

    for (name, value) in [
        ("token_path", &config.token_path),
        ("refresh_path", &config.refresh_path),
        ("register_path", &config.register_path),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::EndpointPath {
                name,
                value: value.clone(),
            });
        }
    }

    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::Timeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ClientConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
