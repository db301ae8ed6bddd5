//! Async client library for the UniTalk interview-practice backend.
//!
//! The heart of the crate is the authenticated request pipeline: every
//! call goes out with the stored bearer credential attached, and a 401
//! triggers exactly one credential renewal per failure wave, with every
//! request that failed on the stale credential replayed in arrival order.
//!
//! ```text
//! caller ──▶ pipeline::ApiClient::send
//!                │  attach Bearer <access> (auth::store)
//!                ▼
//!            UniTalk backend
//!                │
//!          401? ─┼─ no ──▶ response to caller
//!                ▼
//!            renewal wave (one refresh call per wave,
//!            queued peers replayed FIFO, trigger last)
//!                │
//!        failed? ▼
//!            clear credentials + SessionEvent::Terminated
//! ```
//!
//! The typed endpoint surface in [`api`] and the session helpers in
//! [`auth`] sit on top of the pipeline; a hosting application renders
//! whatever comes back.

pub mod api;
pub mod auth;
pub mod config;
pub mod observability;
pub mod pipeline;

pub use auth::events::{SessionEvent, SessionEvents};
pub use auth::session::{SessionIdentity, SessionManager};
pub use auth::store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use config::ClientConfig;
pub use pipeline::{ApiClient, ApiRequest, ApiResponse, ClientError};
