//! Client configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs validation (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → shared by value with ApiClient / UniTalkApi
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so a missing file still yields a working
//!   localhost setup
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, ValidationError};
pub use schema::ClientConfig;
