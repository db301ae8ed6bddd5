//! Authenticated request pipeline.
//!
//! # Data Flow
//! ```text
//! ApiRequest
//!     → client.rs send() (attach Bearer <access>, x-request-id)
//!     → backend
//!     → 401 on a first attempt?
//!         → renewal.rs wave state (open a wave, or queue behind one)
//!         → one refresh call per wave, bypassing the pipeline
//!         → success: FIFO replay of the queue, trigger last
//!         → failure: reject queue, clear credentials, emit Terminated
//!     → anything else passes through untouched
//! ```
//!
//! # Design Decisions
//! - A request is retried at most once; a replayed request's 401 is
//!   terminal and never opens a second wave
//! - The wave flag and queue sit behind a mutex that is never held
//!   across an await, so check-then-set stretches stay atomic
//! - Queued continuations are always resolved or rejected, never
//!   orphaned; abandoning a caller does not cancel its request

pub mod client;
pub mod error;
pub mod renewal;
pub mod request;

pub use client::ApiClient;
pub use error::ClientError;
pub use request::{ApiRequest, ApiResponse};
