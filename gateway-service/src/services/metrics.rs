//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the recording helpers used
//! by the handlers. Until [`init_metrics`] runs, recording is a no-op.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder.
///
/// Safe to call more than once; later calls leave the first recorder in place.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
            tracing::info!("Prometheus metrics initialized");
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record the outcome of a generative request (`success` or `error`).
pub fn record_genai_request(operation: &'static str, outcome: &'static str) {
    counter!("genai_requests_total", "operation" => operation, "outcome" => outcome).increment(1);
}

/// Record provider latency.
pub fn record_provider_latency(provider: &'static str, model: &str, duration_secs: f64) {
    histogram!(
        "genai_provider_latency_seconds",
        "provider" => provider,
        "model" => model.to_string()
    )
    .record(duration_secs);
}

/// Record a provider error.
pub fn record_provider_error(provider: &'static str, error_type: &'static str) {
    counter!(
        "genai_provider_errors_total",
        "provider" => provider,
        "error_type" => error_type
    )
    .increment(1);
}

/// Record token usage per model.
pub fn record_tokens(model: &str, input_tokens: i32, output_tokens: i32) {
    counter!("genai_tokens_total", "model" => model.to_string(), "type" => "input")
        .increment(input_tokens.max(0) as u64);
    counter!("genai_tokens_total", "model" => model.to_string(), "type" => "output")
        .increment(output_tokens.max(0) as u64);
}

/// Record a data store probe outcome (`ok` or `error`).
pub fn record_datastore_probe(outcome: &'static str) {
    counter!("datastore_probes_total", "outcome" => outcome).increment(1);
}
