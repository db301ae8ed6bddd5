//! Typed surface over the UniTalk backend.
//!
//! # Data Flow
//! ```text
//! UniTalkApi method
//!     → types.rs (serialize request payload)
//!     → pipeline::ApiClient::send (auth + renewal handled there)
//!     → 2xx: deserialize into types.rs models
//!     → non-2xx: ClientError::Api { status, body }
//!
//! progress.rs consumes Vec<Answer> locally (no further requests)
//! ```
//!
//! # Design Decisions
//! - Payload shapes mirror the backend's serializers; this layer adds
//!   no validation of its own
//! - Aggregation is pure and client-side, mirroring what the original
//!   dashboards derive for display

pub mod endpoints;
pub mod progress;
pub mod types;

pub use endpoints::UniTalkApi;
