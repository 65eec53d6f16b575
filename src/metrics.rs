//! Metrics for remote call latency and fallback tracking.
//!
//! Recording goes through the `metrics` facade and is a no-op until the
//! embedding application installs a recorder.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

/// Remote call latency metric name.
pub const METRIC_API_CALL_LATENCY: &str = "api_call_latency_ms";
/// Remote calls counter metric name.
pub const METRIC_API_CALLS: &str = "api_calls_total";
/// Fallback envelopes counter metric name.
pub const METRIC_API_FALLBACKS: &str = "api_fallbacks_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_API_CALL_LATENCY,
        "Integration API round trip latency in milliseconds"
    );
    describe_counter!(METRIC_API_CALLS, "Total number of integration API calls");
    describe_counter!(
        METRIC_API_FALLBACKS,
        "Total number of calls answered with a fallback envelope"
    );

    debug!("Metrics initialized");
}

/// Record round trip latency for an endpoint.
pub fn record_call_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_API_CALL_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// Increment calls counter.
pub fn inc_calls(endpoint: &'static str) {
    counter!(METRIC_API_CALLS, "endpoint" => endpoint).increment(1);
}

/// Increment fallbacks counter.
pub fn inc_fallbacks(endpoint: &'static str) {
    counter!(METRIC_API_FALLBACKS, "endpoint" => endpoint).increment(1);
}
