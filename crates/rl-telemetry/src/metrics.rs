//! Prometheus metrics for the rank list.
//!
//! All metrics follow the naming convention: `rl_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // RANKING METRICS
    // =========================================================================

    /// Ranked lists produced
    pub static ref RANKINGS_COMPUTED: Counter = Counter::new(
        "rl_ranking_lists_computed_total",
        "Total number of ranked lists produced"
    ).expect("metric creation failed");

    /// Events in the most recent ranked list
    pub static ref RANKED_EVENTS: Gauge = Gauge::new(
        "rl_ranking_events",
        "Number of events in the most recent ranked list"
    ).expect("metric creation failed");

    /// Time spent resolving and merging
    pub static ref RANKING_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "rl_ranking_merge_duration_seconds",
            "Time spent resolving purchases and merging the ranking"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).unwrap())
    ).expect("metric creation failed");

    // =========================================================================
    // PURCHASE METRICS
    // =========================================================================

    /// Bids admitted
    pub static ref BIDS_ADMITTED: Counter = Counter::new(
        "rl_purchase_bids_admitted_total",
        "Total purchase bids admitted"
    ).expect("metric creation failed");

    /// Bids rejected at admission
    pub static ref BIDS_REJECTED: Counter = Counter::new(
        "rl_purchase_bids_rejected_total",
        "Total purchase bids rejected because the amount was not enough"
    ).expect("metric creation failed");

    // =========================================================================
    // ERROR METRICS
    // =========================================================================

    /// Errors by type
    pub static ref RANKING_ERRORS: CounterVec = CounterVec::new(
        Opts::new("rl_errors_total", "Errors by operation and type"),
        &["operation", "error_type"]
    ).expect("metric creation failed");
}

/// Keeps the registry alive for exporters
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Ranking
        Box::new(RANKINGS_COMPUTED.clone()),
        Box::new(RANKED_EVENTS.clone()),
        Box::new(RANKING_DURATION.clone()),
        // Purchases
        Box::new(BIDS_ADMITTED.clone()),
        Box::new(BIDS_REJECTED.clone()),
        // Errors
        Box::new(RANKING_ERRORS.clone()),
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

/// Encode all metrics as Prometheus text format.
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
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
