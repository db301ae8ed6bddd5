//! Metrics collection.
//!
//! # Metrics
//! - `unitalk_requests_total` (counter): outbound requests by method, status
//! - `unitalk_credential_renewals_total` (counter): renewal attempts by outcome
//! - `unitalk_replays_total` (counter): requests replayed after renewal
//! - `unitalk_session_teardowns_total` (counter): forced logouts

use metrics::counter;

/// Record a completed outbound request.
pub fn record_request(method: &str, status: u16) {
    counter!(
        "unitalk_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a credential renewal attempt ("success" or "failure").
pub fn record_renewal(outcome: &'static str) {
    counter!("unitalk_credential_renewals_total", "outcome" => outcome).increment(1);
}

/// Record a request replayed with a renewed credential.
pub fn record_replay() {
    counter!("unitalk_replays_total").increment(1);
}

/// Record a forced session teardown.
pub fn record_session_teardown() {
    counter!("unitalk_session_teardowns_total").increment(1);
}
