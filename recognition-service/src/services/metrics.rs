//! Metrics collection for recognition-service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static RELAY_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static UPSTREAM_CALLS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize metrics collection. Safe to call once per process.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }

    let registry = Registry::new();

    let relay_counter = IntCounterVec::new(
        Opts::new(
            "relay_requests_total",
            "Total relay requests by scene and status",
        ),
        &["scene", "status"],
    )
    .expect("Failed to create relay_requests_total metric");

    let upstream_counter = IntCounterVec::new(
        Opts::new(
            "upstream_calls_total",
            "Total Baidu API calls by scene and outcome",
        ),
        &["scene", "outcome"],
    )
    .expect("Failed to create upstream_calls_total metric");

    registry
        .register(Box::new(relay_counter.clone()))
        .expect("Failed to register relay_requests_total");
    registry
        .register(Box::new(upstream_counter.clone()))
        .expect("Failed to register upstream_calls_total");

    PROMETHEUS_REGISTRY
        .set(registry)
        .expect("Failed to set prometheus registry");
    RELAY_REQUESTS_TOTAL
        .set(relay_counter)
        .expect("Failed to set relay_requests_total");
    UPSTREAM_CALLS_TOTAL
        .set(upstream_counter)
        .expect("Failed to set upstream_calls_total");
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// Record an inbound relay request and its final status.
pub fn record_relay_request(scene: &str, status: &str) {
    if let Some(counter) = RELAY_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[scene, status]).inc();
    }
}

/// Record an outbound Baidu API call.
pub fn record_upstream_call(scene: &str, outcome: &str) {
    if let Some(counter) = UPSTREAM_CALLS_TOTAL.get() {
        counter.with_label_values(&[scene, outcome]).inc();
    }
}
