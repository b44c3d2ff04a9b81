use bnode_cli::{logging, Cli, CliOptions};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    bnode_cli::run(cli, CliOptions::default()).await
}
