//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_vec_with_registry, Counter, CounterVec, HistogramVec, Opts, Registry,
};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Prioritization API metrics
    pub prioritize_requests: CounterVec,
    pub prioritize_request_duration: HistogramVec,

    // Upstream model metrics
    pub model_calls: CounterVec,

    // Reconciliation metrics
    pub fallbacks: Counter,
    pub repaired_orderings: Counter,
    pub appended_tasks: Counter,
    pub regenerated_reasonings: Counter,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let prioritize_requests = register_counter_vec_with_registry!(
            Opts::new("prioritize_requests_total", "Total prioritization requests"),
            &["status"],
            registry
        )?;

        let prioritize_request_duration = register_histogram_vec_with_registry!(
            "prioritize_request_duration_seconds",
            "Prioritization request duration in seconds",
            &["endpoint"],
            registry
        )?;

        let model_calls = register_counter_vec_with_registry!(
            Opts::new("model_calls_total", "Total upstream model calls"),
            &["status"],
            registry
        )?;

        let fallbacks = register_counter_with_registry!(
            Opts::new(
                "reconcile_fallbacks_total",
                "Total unparsable model responses resolved via fallback"
            ),
            registry
        )?;

        let repaired_orderings = register_counter_with_registry!(
            Opts::new(
                "reconcile_repaired_orderings_total",
                "Total orderings repaired for completeness"
            ),
            registry
        )?;

        let appended_tasks = register_counter_with_registry!(
            Opts::new(
                "reconcile_appended_tasks_total",
                "Total tasks appended to incomplete orderings"
            ),
            registry
        )?;

        let regenerated_reasonings = register_counter_with_registry!(
            Opts::new(
                "reconcile_regenerated_reasonings_total",
                "Total reasoning strings regenerated after fidelity failures"
            ),
            registry
        )?;

        Ok(Self {
            registry,
            prioritize_requests,
            prioritize_request_duration,
            model_calls,
            fallbacks,
            repaired_orderings,
            appended_tasks,
            regenerated_reasonings,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a prioritization request
    pub fn record_prioritize(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.prioritize_requests.with_label_values(&[status]).inc();
    }

    /// Record an upstream model call
    pub fn record_model_call(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.model_calls.with_label_values(&[status]).inc();
    }

    /// Record an unparsable response resolved via fallback
    pub fn record_fallback(&self) {
        self.fallbacks.inc();
    }

    /// Record a completeness repair
    pub fn record_repair(&self, appended: usize) {
        self.repaired_orderings.inc();
        self.appended_tasks.inc_by(appended as f64);
    }

    /// Record regenerated reasoning strings
    pub fn record_reasoning_regenerated(&self, count: usize) {
        self.regenerated_reasonings.inc_by(count as f64);
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        let metrics = Metrics::new();
        assert!(metrics.is_ok());
    }

    #[test]
    fn test_record_prioritize() {
        let metrics = Metrics::new().unwrap();
        metrics.record_prioritize(true);
        metrics.record_prioritize(false);
        // Metrics should be recorded without panicking
    }

    #[test]
    fn test_record_repair() {
        let metrics = Metrics::new().unwrap();
        metrics.record_repair(2);
        metrics.record_reasoning_regenerated(1);
        metrics.record_fallback();
    }

    #[test]
    fn test_export_contains_registered_metrics() {
        let metrics = Metrics::new().unwrap();
        metrics.record_prioritize(true);
        let exported = metrics.export_prometheus();
        assert!(exported.contains("prioritize_requests_total"));
    }
}
