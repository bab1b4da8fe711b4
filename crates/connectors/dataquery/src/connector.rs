//! The connector: a registry snapshot plus the transient state, and the
//! operations served over them.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tracing::{info_span, Instrument};

use dataquery_configuration as configuration;
use dataquery_configuration::error::{MakeRuntimeConfigurationError, ParseConfigurationError};
use dataquery_models as models;

use crate::executor::Executor;
use crate::query::{self, QueryError};
use crate::schema::{self, SchemaError};
use crate::state::{self, InitializationError};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Parse(#[from] ParseConfigurationError),
    #[error("invalid configuration: {0}")]
    Configuration(#[from] MakeRuntimeConfigurationError),
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

pub struct DataQuery {
    /// Replaced wholesale on reload. Each request works on the snapshot it
    /// loaded first.
    configuration: ArcSwap<configuration::Configuration>,
    state: state::State,
}

/// Read a configuration directory and check it.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<configuration::Configuration, SetupError> {
    let parsed_configuration = configuration::parse_configuration(configuration_dir)
        .instrument(info_span!("parse configuration"))
        .await?;
    Ok(configuration::make_runtime_configuration(
        parsed_configuration,
    )?)
}

impl DataQuery {
    pub fn new(
        configuration: configuration::Configuration,
        metrics_registry: &mut prometheus::Registry,
    ) -> Result<Self, SetupError> {
        let state = info_span!("Initialise state")
            .in_scope(|| state::create_state(metrics_registry))
            .map_err(|err| {
                tracing::error!(
                    meta.signal_type = "log",
                    event.domain = "dataquery",
                    event.name = "Initialization error",
                    name = "Initialization error",
                    body = %err,
                    error = true,
                );
                err
            })?;

        Ok(DataQuery {
            configuration: ArcSwap::from_pointee(configuration),
            state,
        })
    }

    /// Parse the configuration directory and initialise the connector.
    pub async fn from_directory(
        configuration_dir: impl AsRef<Path>,
        metrics_registry: &mut prometheus::Registry,
    ) -> Result<Self, SetupError> {
        let configuration = parse_configuration(configuration_dir).await?;
        Self::new(configuration, metrics_registry)
    }

    /// The registry snapshot currently served.
    pub fn configuration(&self) -> Arc<configuration::Configuration> {
        self.configuration.load_full()
    }

    /// Re-read the configuration directory and swap the new registry in.
    /// On failure the current registry stays in place.
    pub async fn reload(&self, configuration_dir: impl AsRef<Path>) -> Result<(), SetupError> {
        let configuration = parse_configuration(configuration_dir).await?;
        tracing::info!(
            resources = configuration.metadata.resources.0.len(),
            "configuration reloaded"
        );
        self.configuration.store(Arc::new(configuration));
        Ok(())
    }

    /// The discovery document of a resource.
    pub fn options(&self, resource: &str) -> Result<models::OptionsResponse, SchemaError> {
        let _span = info_span!("Get options", resource).entered();
        let configuration = self.configuration.load();
        let options = schema::get_options(&configuration, resource).map_err(|err| {
            tracing::error!(
                meta.signal_type = "log",
                event.domain = "dataquery",
                event.name = "Schema error",
                name = "Schema error",
                body = %err,
                error = true,
            );
            err
        })?;
        self.state.metrics.options_total.inc();
        Ok(options)
    }

    /// Validate a query, producing its plan.
    pub fn validate(&self, query: &models::Query) -> Result<models::Plan, models::ErrorResponse> {
        query::validate(&self.configuration.load(), &self.state, query)
    }

    /// Validate a query and execute it.
    pub async fn query<E: Executor + ?Sized>(
        &self,
        query: &models::Query,
        executor: &E,
    ) -> Result<models::DataResponse, QueryError> {
        let configuration = self.configuration.load_full();
        query::query(&configuration, &self.state, query, executor).await
    }
}
