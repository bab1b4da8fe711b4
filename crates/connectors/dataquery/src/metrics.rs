//! Metrics setup and update for the connector.

use prometheus::IntCounter;

#[derive(Debug, Clone)]
pub struct Metrics {
    pub validation_total: IntCounter,
    pub validation_rejected_total: IntCounter,
    pub query_total: IntCounter,
    pub options_total: IntCounter,
}

impl Metrics {
    /// Setup counters used to produce Prometheus metrics
    pub fn initialize(
        metrics_registry: &mut prometheus::Registry,
    ) -> Result<Self, prometheus::Error> {
        let validation_total = add_int_counter_metric(
            metrics_registry,
            "dataquery_validation_total",
            "Total queries validated.",
        )?;

        let validation_rejected_total = add_int_counter_metric(
            metrics_registry,
            "dataquery_validation_rejected_total",
            "Total queries rejected by validation.",
        )?;

        let query_total = add_int_counter_metric(
            metrics_registry,
            "dataquery_query_total",
            "Total successful queries.",
        )?;

        let options_total = add_int_counter_metric(
            metrics_registry,
            "dataquery_options_total",
            "Total discovery documents served.",
        )?;

        Ok(Self {
            validation_total,
            validation_rejected_total,
            query_total,
            options_total,
        })
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<IntCounter, prometheus::Error> {
    let int_counter =
        IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}
