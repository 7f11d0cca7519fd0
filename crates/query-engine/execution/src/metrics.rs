//! Metrics setup and update for query execution.

use std::time::Duration;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, Opts, Registry};

#[derive(Debug, Clone)]
pub struct Metrics {
    pub read_total: IntCounter,
    pub http_fetch_total: IntCounter,
    pub document_query_total: IntCounter,
    pub clause_compile_seconds: HistogramVec,
}

impl Metrics {
    /// Set up the counters and histograms and register them with the
    /// provided Prometheus registry.
    pub fn initialize(metrics_registry: &mut Registry) -> Result<Self, prometheus::Error> {
        let read_total = add_int_counter_metric(
            metrics_registry,
            "dragoman_read_total",
            "Total successful reads.",
        )?;

        let http_fetch_total = add_int_counter_metric(
            metrics_registry,
            "dragoman_http_fetch_total",
            "Total fetches from HTTP sources.",
        )?;

        let document_query_total = add_int_counter_metric(
            metrics_registry,
            "dragoman_document_query_total",
            "Total queries sent to the document store.",
        )?;

        let clause_compile_seconds = add_histogram_vec_metric(
            metrics_registry,
            "dragoman_clause_compile_seconds",
            "Time taken to compile a clause for the document store.",
            &["clause"],
        )?;

        Ok(Self {
            read_total,
            http_fetch_total,
            document_query_total,
            clause_compile_seconds,
        })
    }

    pub fn record_successful_read(&self) {
        self.read_total.inc();
    }

    pub fn record_http_fetch(&self) {
        self.http_fetch_total.inc();
    }

    pub fn record_document_query(&self) {
        self.document_query_total.inc();
    }

    pub fn observe_clause_compile(&self, clause: &str, elapsed: Duration) {
        self.clause_compile_seconds
            .with_label_values(&[clause])
            .observe(elapsed.as_secs_f64());
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<IntCounter, prometheus::Error> {
    let int_counter = IntCounter::with_opts(Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new histogram metric with labels and register it with the provided Prometheus Registry
fn add_histogram_vec_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
    labels: &[&str],
) -> Result<HistogramVec, prometheus::Error> {
    let histogram = HistogramVec::new(HistogramOpts::new(metric_name, metric_description), labels)?;
    metrics_registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}
