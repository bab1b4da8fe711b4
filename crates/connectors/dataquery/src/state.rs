//! Transient state used by the connector.
//!
//! This is initialized on startup.

use thiserror::Error;
use tracing::info_span;

use crate::metrics;

/// State for our connector.
#[derive(Debug, Clone)]
pub struct State {
    pub metrics: metrics::Metrics,
}

/// Register the connector's metrics and wrap them inside a connector State.
pub fn create_state(
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let metrics = info_span!("Setup metrics").in_scope(|| {
        metrics::Metrics::initialize(metrics_registry).map_err(InitializationError::MetricsError)
    })?;

    Ok(State { metrics })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
