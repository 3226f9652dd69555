// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::configure;

// ============================================================================
// Metrics Module - Prometheus metrics for the query layer
// ============================================================================
//
// Provides:
// - Query counts by statement and outcome
// - Query latency by statement
// - Request counts by route and HTTP status
//
// All metrics are registered with one registry and scraped via /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub db_queries_total: IntCounterVec,
    pub db_query_duration: HistogramVec,
    pub http_responses_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let db_queries_total = IntCounterVec::new(
            Opts::new("db_queries_total", "Total statements executed"),
            &["statement", "outcome"],
        )?;
        registry.register(Box::new(db_queries_total.clone()))?;

        let db_query_duration = HistogramVec::new(
            HistogramOpts::new("db_query_duration_seconds", "Statement execution time")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["statement"],
        )?;
        registry.register(Box::new(db_query_duration.clone()))?;

        let http_responses_total = IntCounterVec::new(
            Opts::new("http_responses_total", "Total responses by route and status"),
            &["route", "status"],
        )?;
        registry.register(Box::new(http_responses_total.clone()))?;

        Ok(Self {
            registry,
            db_queries_total,
            db_query_duration,
            http_responses_total,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record one statement execution
    pub fn record_query(&self, statement: &str, duration_secs: f64, success: bool) {
        let outcome = if success { "ok" } else { "error" };
        self.db_queries_total.with_label_values(&[statement, outcome]).inc();
        self.db_query_duration.with_label_values(&[statement]).observe(duration_secs);
    }

    /// Helper to record one handled response
    pub fn record_response(&self, route: &str, status: u16) {
        self.http_responses_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }
}
