use axum::extract::State;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// GET /metrics - Prometheus exposition format
pub async fn metrics(State(handle): State<Arc<PrometheusHandle>>) -> String {
    handle.render()
}
