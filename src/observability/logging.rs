//! Structured logging.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Call once at startup.
///
/// Honors `RUST_LOG`; defaults to debug-level output for this crate.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unitalk_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
