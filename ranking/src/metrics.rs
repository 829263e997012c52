//! Prometheus metrics for the ranking service.
//!
//! # Example
//!
//! ```rust,ignore
//! use ranking::metrics::Metrics;
//!
//! let metrics = Metrics::new();
//! metrics.submissions_total.inc();
//!
//! // Get Prometheus text format
//! let output = metrics.gather();
//! ```

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Instant;

/// Read operations, used as the `op` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOp {
    Rank,
    Top,
    Around,
}

impl QueryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOp::Rank => "rank",
            QueryOp::Top => "top",
            QueryOp::Around => "around",
        }
    }
}

/// Ranking service metrics.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,

    /// Score submissions accepted by the service.
    pub submissions_total: IntCounter,
    /// Read queries by operation.
    pub queries_total: IntCounterVec,
    /// Read query duration in seconds, by operation.
    pub query_duration: HistogramVec,
}

impl Metrics {
    /// Create a new metrics instance with all metrics registered.
    pub fn new() -> Self {
        let registry = Registry::new();

        let submissions_total =
            IntCounter::new("ranking_submissions_total", "Score submissions accepted")
                .expect("metric can be created");
        registry.register(Box::new(submissions_total.clone())).unwrap();

        let queries_total = IntCounterVec::new(
            Opts::new("ranking_queries_total", "Ranking queries by operation"),
            &["op"],
        )
        .expect("metric can be created");
        registry.register(Box::new(queries_total.clone())).unwrap();

        let query_duration = HistogramVec::new(
            HistogramOpts::new(
                "ranking_query_duration_seconds",
                "Ranking query duration in seconds",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1, 1.0]),
            &["op"],
        )
        .expect("metric can be created");
        registry.register(Box::new(query_duration.clone())).unwrap();

        Self {
            registry,
            submissions_total,
            queries_total,
            query_duration,
        }
    }

    /// Record one completed query.
    pub fn observe_query(&self, op: QueryOp, started: Instant) {
        self.queries_total.with_label_values(&[op.as_str()]).inc();
        self.query_duration
            .with_label_values(&[op.as_str()])
            .observe(started.elapsed().as_secs_f64());
    }

    /// Render all metrics in Prometheus text format.
    pub fn gather(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
