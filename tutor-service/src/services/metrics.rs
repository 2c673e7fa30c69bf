//! Prometheus metrics for tutor-service.
//!
//! Tracks completion API calls, latency, and token consumption per task.

use crate::models::Usage;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static COMPLETION_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static COMPLETION_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static COMPLETION_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup.
pub fn init_metrics() {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new(
            "completion_requests_total",
            "Total completion API calls by task, model, and outcome",
        ),
        &["task", "model", "outcome"],
    )
    .expect("Failed to create completion_requests_total metric");

    let tokens_total = IntCounterVec::new(
        Opts::new(
            "completion_tokens_total",
            "Tokens consumed by completion API calls",
        ),
        &["task", "kind"],
    )
    .expect("Failed to create completion_tokens_total metric");

    let latency_seconds = HistogramVec::new(
        HistogramOpts::new(
            "completion_latency_seconds",
            "Completion API call latency in seconds",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["task"],
    )
    .expect("Failed to create completion_latency_seconds metric");

    registry
        .register(Box::new(requests_total.clone()))
        .expect("Failed to register completion_requests_total");
    registry
        .register(Box::new(tokens_total.clone()))
        .expect("Failed to register completion_tokens_total");
    registry
        .register(Box::new(latency_seconds.clone()))
        .expect("Failed to register completion_latency_seconds");

    let _ = COMPLETION_REQUESTS_TOTAL.set(requests_total);
    let _ = COMPLETION_TOKENS_TOTAL.set(tokens_total);
    let _ = COMPLETION_LATENCY_SECONDS.set(latency_seconds);
    let _ = REGISTRY.set(registry);
}

pub fn record_completion(task: &str, model: &str, outcome: &str) {
    if let Some(counter) = COMPLETION_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[task, model, outcome]).inc();
    }
}

pub fn record_tokens(task: &str, usage: &Usage) {
    if let Some(counter) = COMPLETION_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[task, "prompt"])
            .inc_by(usage.prompt_tokens as u64);
        counter
            .with_label_values(&[task, "completion"])
            .inc_by(usage.completion_tokens as u64);
    }
}

pub fn observe_latency(task: &str, seconds: f64) {
    if let Some(histogram) = COMPLETION_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[task]).observe(seconds);
    }
}

/// Render all registered metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let Some(registry) = REGISTRY.get() else {
        return String::new();
    };

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
