//! Request metrics for the API client.
//!
//! Only the `metrics` facade is used here; installing a recorder/exporter is up
//! to the host application. Without one, these calls are no-ops.

use std::time::Duration;

use metrics::{counter, histogram};

/// Counter of finished requests, labelled by operation and status
pub const REQUESTS_TOTAL: &str = "uspy_client_requests_total";
/// Request latency histogram, labelled by operation
pub const REQUEST_DURATION: &str = "uspy_client_request_duration_seconds";

/// Record one API call.
///
/// `status` is `None` when the request never got an HTTP answer
/// (connection refused, timeout, ...).
pub fn record_request(operation: &'static str, status: Option<u16>, elapsed: Duration) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());

    counter!(REQUESTS_TOTAL, "operation" => operation, "status" => status).increment(1);
    histogram!(REQUEST_DURATION, "operation" => operation).record(elapsed.as_secs_f64());
}
