//! The hand-off to whatever runs a validated query against a store.

use async_trait::async_trait;
use thiserror::Error;

use dataquery_models as models;

/// Runs a validated query.
///
/// Implementations receive the plan together with the original query, which
/// still carries the filter values, window specs and page cursor. They are
/// never handed a query that failed validation.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(
        &self,
        plan: &models::Plan,
        query: &models::Query,
    ) -> Result<models::DataResponse, ExecutionError>;
}

/// A failure reported by an executor.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),
    #[error("store error: {0}")]
    Store(Box<dyn std::error::Error + Send + Sync>),
}
