//! Prometheus metrics for dataset queries and upstream dashboard calls.
//!
//! This module provides:
//! - Dataset query latency and outcome counters
//! - Upstream request latency, request and failure counters
//! - The recorder handle backing the `/metrics` endpoints

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Dataset query latency metric name.
pub const METRIC_DATASET_QUERY_LATENCY: &str = "dataset_query_latency_ms";
/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_request_latency_ms";
/// Dataset queries served counter metric name.
pub const METRIC_DATASET_QUERIES: &str = "dataset_queries_total";
/// Dataset queries without matching rows counter metric name.
pub const METRIC_DATASET_MISSES: &str = "dataset_query_misses_total";
/// Upstream requests counter metric name.
pub const METRIC_UPSTREAM_REQUESTS: &str = "upstream_requests_total";
/// Upstream failures counter metric name.
pub const METRIC_UPSTREAM_FAILURES: &str = "upstream_failures_total";

/// Install the global Prometheus recorder and describe all metrics.
/// Call this once at startup.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Register metric descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_DATASET_QUERY_LATENCY,
        "Dataset filter and aggregation latency in milliseconds"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "City Health Dashboard request latency in milliseconds"
    );

    describe_counter!(METRIC_DATASET_QUERIES, "Total number of dataset queries served");
    describe_counter!(
        METRIC_DATASET_MISSES,
        "Total number of dataset queries that matched no rows"
    );
    describe_counter!(
        METRIC_UPSTREAM_REQUESTS,
        "Total number of requests sent to the dashboard API"
    );
    describe_counter!(
        METRIC_UPSTREAM_FAILURES,
        "Total number of failed dashboard API requests"
    );

    debug!("Metrics initialized");
}

/// Record upstream request latency.
pub fn record_upstream_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// Increment upstream requests counter.
pub fn inc_upstream_requests(endpoint: &str) {
    counter!(METRIC_UPSTREAM_REQUESTS, "endpoint" => endpoint.to_string()).increment(1);
}

/// Increment upstream failures counter.
pub fn inc_upstream_failures(endpoint: &str) {
    counter!(METRIC_UPSTREAM_FAILURES, "endpoint" => endpoint.to_string()).increment(1);
}

/// Increment dataset queries counter.
pub fn inc_dataset_queries(route: &'static str) {
    counter!(METRIC_DATASET_QUERIES, "route" => route).increment(1);
}

/// Increment dataset misses counter.
pub fn inc_dataset_misses(route: &'static str) {
    counter!(METRIC_DATASET_MISSES, "route" => route).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for a dataset query.
pub fn timer_dataset_query() -> LatencyTimer {
    LatencyTimer::new(METRIC_DATASET_QUERY_LATENCY)
}
