//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline + auth produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → Whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every pipeline log line
//! - Counters go through the `metrics` facade only; no exporter is
//!   shipped, the hosting application picks one

pub mod logging;
pub mod metrics;
