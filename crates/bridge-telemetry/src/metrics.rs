//! Prometheus metrics for the bridge.
//!
//! All metrics follow the naming convention: `sb_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Dispatch attempts by outcome (accepted, or the rejecting error kind)
    pub static ref DISPATCHES: CounterVec = CounterVec::new(
        Opts::new("sb_dispatch_attempts_total", "verify_and_dispatch calls by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Dispatch latency
    pub static ref DISPATCH_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "sb_dispatch_duration_seconds",
            "Time spent in verify_and_dispatch"
        ).buckets(exponential_buckets(0.0001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // SIGNATURES
    // =========================================================================

    /// Quorum signature checks by scheme and result
    pub static ref SIGNATURE_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("sb_signature_verifications_total", "Quorum signature checks"),
        &["scheme", "result"]  // scheme: recoverable/aggregate, result: valid/invalid
    ).expect("metric creation failed");

    // =========================================================================
    // INBOX
    // =========================================================================

    /// Inbox transitions
    pub static ref INBOX_MESSAGES: CounterVec = CounterVec::new(
        Opts::new("sb_inbox_messages_total", "Inbox messages by transition"),
        &["transition"]  // sent/consumed/cancelled
    ).expect("metric creation failed");

    // =========================================================================
    // OPERATORS
    // =========================================================================

    /// Slashes applied
    pub static ref SLASHINGS: Counter = Counter::new(
        "sb_operator_slashings_total",
        "Total number of operator slashes"
    ).expect("metric creation failed");

    /// Currently active operators
    pub static ref ACTIVE_OPERATORS: Gauge = Gauge::new(
        "sb_operators_active",
        "Number of operators counting toward quorum"
    ).expect("metric creation failed");

    /// Stake bonded by active operators (base units, lossy above 2^53)
    pub static ref TOTAL_STAKED: Gauge = Gauge::new(
        "sb_operators_staked",
        "Total stake bonded by active operators"
    ).expect("metric creation failed");

    // =========================================================================
    // ERRORS
    // =========================================================================

    /// Rejected operations by operation and error kind
    pub static ref BRIDGE_ERRORS: CounterVec = CounterVec::new(
        Opts::new("sb_errors_total", "Rejected operations by operation and kind"),
        &["operation", "kind"]
    ).expect("metric creation failed");
}

/// Handle to the registry holding the bridge metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(DISPATCHES.clone()),
        Box::new(DISPATCH_DURATION.clone()),
        Box::new(SIGNATURE_VERIFICATIONS.clone()),
        Box::new(INBOX_MESSAGES.clone()),
        Box::new(SLASHINGS.clone()),
        Box::new(ACTIVE_OPERATORS.clone()),
        Box::new(TOTAL_STAKED.clone()),
        Box::new(BRIDGE_ERRORS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all registered metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
