//! The dataquery command-line tool: create a configuration directory,
//! validate queries against it, and describe its resources.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Subcommand, ValueEnum};
use tokio::fs;

use dataquery::DataQuery;
use dataquery_configuration as configuration;
use dataquery_models as models;

/// The various contextual bits and bobs we need to run.
pub struct Context<Out: Write> {
    pub context_path: PathBuf,
    pub output: Out,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write an initial configuration with the sample resources.
    Initialize {
        /// Overwrite an existing configuration.
        #[arg(long)]
        force: bool,
    },
    /// Validate a query file and print its plan, or every violation found.
    Validate {
        /// Path to a JSON query.
        #[arg(long)]
        query: PathBuf,
    },
    /// Print the discovery document of a resource.
    Describe {
        #[arg(long)]
        resource: String,
    },
    /// Print the JSON schema of a document format.
    PrintSchema {
        #[arg(value_enum)]
        document: Document,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Document {
    Query,
    Configuration,
    Options,
}

/// Whether the command succeeded or a query was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Rejected,
}

/// Run a command in a given directory.
pub async fn run<Out: Write>(
    command: Command,
    context: &mut Context<Out>,
) -> anyhow::Result<Outcome> {
    match command {
        Command::Initialize { force } => initialize(&context.context_path, force).await,
        Command::Validate { query } => validate(context, &query).await,
        Command::Describe { resource } => describe(context, &resource).await,
        Command::PrintSchema { document } => print_schema(context, document),
    }
}

/// Write the initial configuration and its JSON schema into the directory.
async fn initialize(context_path: &Path, force: bool) -> anyhow::Result<Outcome> {
    let configuration_file = context_path.join(configuration::CONFIGURATION_FILENAME);
    if !force && fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "{} already exists, use --force to overwrite it",
            configuration_file.display()
        );
    }

    configuration::write_parsed_configuration(
        configuration::ParsedConfiguration::initial(),
        context_path,
    )
    .await?;
    tracing::info!(path = %context_path.display(), "configuration initialized");
    Ok(Outcome::Success)
}

async fn connector(context_path: &Path) -> anyhow::Result<DataQuery> {
    let mut metrics_registry = prometheus::Registry::new();
    DataQuery::from_directory(context_path, &mut metrics_registry)
        .await
        .with_context(|| format!("loading configuration from {}", context_path.display()))
}

async fn validate<Out: Write>(
    context: &mut Context<Out>,
    query_path: &Path,
) -> anyhow::Result<Outcome> {
    let connector = connector(&context.context_path).await?;

    let contents = fs::read_to_string(query_path)
        .await
        .with_context(|| format!("reading {}", query_path.display()))?;
    // a query that does not decode is malformed, not rejected
    let query: models::Query = serde_json::from_str(&contents)
        .with_context(|| format!("decoding {}", query_path.display()))?;

    match connector.validate(&query) {
        Ok(plan) => {
            write_json(&mut context.output, &plan)?;
            Ok(Outcome::Success)
        }
        Err(errors) => {
            write_json(&mut context.output, &errors)?;
            Ok(Outcome::Rejected)
        }
    }
}

async fn describe<Out: Write>(
    context: &mut Context<Out>,
    resource: &str,
) -> anyhow::Result<Outcome> {
    let connector = connector(&context.context_path).await?;
    let options = connector.options(resource)?;
    write_json(&mut context.output, &options)?;
    Ok(Outcome::Success)
}

fn print_schema<Out: Write>(
    context: &mut Context<Out>,
    document: Document,
) -> anyhow::Result<Outcome> {
    let schema = match document {
        Document::Query => schemars::schema_for!(models::Query),
        Document::Configuration => schemars::schema_for!(configuration::ParsedConfiguration),
        Document::Options => schemars::schema_for!(models::OptionsResponse),
    };
    write_json(&mut context.output, &schema)?;
    Ok(Outcome::Success)
}

fn write_json<Out: Write>(output: &mut Out, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *output, value)?;
    writeln!(output)?;
    Ok(())
}
