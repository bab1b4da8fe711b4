use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use dataquery::{DataQuery, ExecutionError, Executor};
use dataquery_configuration::{make_runtime_configuration, ParsedConfiguration};
use dataquery_models as models;

/// A connector over the initial registry, with its own metrics registry.
pub fn connector() -> (DataQuery, prometheus::Registry) {
    let mut registry = prometheus::Registry::new();
    let configuration = make_runtime_configuration(ParsedConfiguration::initial()).unwrap();
    let connector = DataQuery::new(configuration, &mut registry).unwrap();
    (connector, registry)
}

/// Read a counter from a metrics registry.
pub fn counter(registry: &prometheus::Registry, name: &str) -> f64 {
    registry
        .gather()
        .iter()
        .find(|family| family.get_name() == name)
        .map_or(0.0, |family| family.get_metric()[0].get_counter().get_value())
}

/// An executor that answers every query with one row of nulls and counts
/// how often it was called.
#[derive(Default)]
pub struct RecordingExecutor {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute(
        &self,
        plan: &models::Plan,
        query: &models::Query,
    ) -> Result<models::DataResponse, ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if query.page.as_ref().and_then(|page| page.cursor.as_deref()) == Some("stale") {
            return Err(ExecutionError::InvalidCursor("stale".into()));
        }
        let row = plan
            .projection_aliases
            .iter()
            .map(|alias| (alias.clone(), json!(null)))
            .collect();
        Ok(models::DataResponse {
            data: vec![row],
            meta: models::Meta::for_plan(plan, None),
        })
    }
}
