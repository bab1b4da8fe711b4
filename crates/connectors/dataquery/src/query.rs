//! Validate a query and hand it to an executor.

use thiserror::Error;
use tracing::{info_span, Instrument};

use dataquery_configuration::Configuration;
use dataquery_models as models;
use query_engine_translation::translation;

use crate::executor::{ExecutionError, Executor};
use crate::state::State;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query rejected: {0}")]
    Rejected(models::ErrorResponse),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Validate a query against the registry.
pub fn validate(
    configuration: &Configuration,
    state: &State,
    query: &models::Query,
) -> Result<models::Plan, models::ErrorResponse> {
    let _span = info_span!("Validate query", resource = %query.data_source).entered();
    state.metrics.validation_total.inc();

    translation::query::translate(&configuration.metadata, query).map_err(|errors| {
        state.metrics.validation_rejected_total.inc();
        tracing::error!(
            meta.signal_type = "log",
            event.domain = "dataquery",
            event.name = "Validation error",
            name = "Validation error",
            codes = ?errors.codes(),
            body = %errors,
            error = true,
        );
        errors
    })
}

/// Validate a query, then execute it. A rejected query never reaches the executor.
pub async fn query<E: Executor + ?Sized>(
    configuration: &Configuration,
    state: &State,
    query: &models::Query,
    executor: &E,
) -> Result<models::DataResponse, QueryError> {
    let plan = validate(configuration, state, query).map_err(QueryError::Rejected)?;

    let response = executor
        .execute(&plan, query)
        .instrument(info_span!("Execute query"))
        .await
        .map_err(|err| {
            tracing::error!(
                meta.signal_type = "log",
                event.domain = "dataquery",
                event.name = "Execution error",
                name = "Execution error",
                body = %err,
                error = true,
            );
            err
        })?;

    // assuming query succeeded, increment counter
    state.metrics.query_total.inc();

    Ok(response)
}
