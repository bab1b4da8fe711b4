//! The CLI can do a few things. This provides a central point where those things are routed and
//! then done, making it easier to test this crate deterministically.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use dataquery_cli::{run, Command, Context, Outcome};

/// The command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "dataquery-cli", version, about)]
pub struct Args {
    /// The configuration directory.
    #[arg(
        long = "configuration",
        value_name = "DIRECTORY",
        env = "DATAQUERY_CONFIGURATION_DIRECTORY",
        default_value = "."
    )]
    pub context_path: PathBuf,
    /// The command to invoke.
    #[command(subcommand)]
    pub subcommand: Command,
}

/// Log to stderr, filtered by `RUST_LOG`, so that stdout only carries JSON.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The application entrypoint. It pulls information from the environment and then calls the [run]
/// function.
#[tokio::main]
pub async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let mut context = Context {
        context_path: args.context_path,
        output: std::io::stdout(),
    };
    match run(args.subcommand, &mut context).await {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(2),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
