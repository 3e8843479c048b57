use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    init_metric_descriptions();

    handle
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "move_plan_requests_total",
        "Total number of move-plan requests"
    );
    describe_histogram!(
        "move_plan_request_duration_seconds",
        "Move-plan derivation duration in seconds"
    );
    describe_counter!(
        "move_plan_fallbacks_total",
        "Cost categories that degraded to a flat fallback estimate"
    );
    describe_gauge!(
        "whatsthemove_info",
        "Service version and build information"
    );

    gauge!("whatsthemove_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a request
pub fn record_request(endpoint: &str) {
    counter!(
        "move_plan_requests_total",
        "endpoint" => endpoint.to_string(),
    )
    .increment(1);
}

/// Record request duration
pub fn record_duration(endpoint: &str, duration: Duration) {
    histogram!(
        "move_plan_request_duration_seconds",
        "endpoint" => endpoint.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record a category that fell back to its flat estimate
pub fn record_fallback(category: &str) {
    counter!(
        "move_plan_fallbacks_total",
        "category" => category.to_string(),
    )
    .increment(1);
}
