//! bnode CLI Library
//!
//! Command routing for the `bnode` binary. [`run`] takes an already parsed
//! [`Cli`], dispatches to the matching command and maps the outcome to an
//! exit code.

pub mod args;
pub mod commands;
pub mod error;
pub mod logging;
pub mod params;

pub use args::{Cli, Command, LogLevel};
pub use error::{CliError, CliResult};

use commands::CommandContext;
use std::process::ExitCode;
use tracing::debug;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options supplied by the embedding program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Services added to the synthesized default configuration
    pub additional_services: Vec<String>,
}

/// Runs the parsed command line. Errors are printed to stderr.
pub async fn run(cli: Cli, options: CliOptions) -> ExitCode {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => return report(CliError::io("failed to read current directory", err)),
    };

    match dispatch(&CommandContext::new(cwd, options), cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}

/// Dispatches `command` within `ctx`.
pub async fn dispatch(ctx: &CommandContext, command: Command) -> CliResult<()> {
    debug!(target: "bnode", ?command, cwd = %ctx.cwd.display(), "dispatching command");
    match command {
        Command::Create {
            directory,
            datadir,
            testnet,
        } => commands::create::run(ctx, &directory, datadir, testnet),
        Command::Start { config } => commands::start::run(ctx, config.as_deref()).await,
        Command::Install { services } => commands::services::install(ctx, &services),
        Command::Uninstall { services } => commands::services::uninstall(ctx, &services),
        Command::Call { method, params } => commands::call::run(ctx, &method, &params).await,
        Command::FixMissingTx { txid } => commands::fix::run(ctx, &txid).await,
    }
}

fn report(err: CliError) -> ExitCode {
    eprintln!("error: {err}");
    err.exit_code()
}
