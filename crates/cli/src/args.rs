use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for bnode
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bnode",
    version = env!("CARGO_PKG_VERSION"),
    about = "bnode - create, run and repair a blockchain full node",
    arg_required_else_help = true
)]
pub struct Cli {
    /// The verbose log level (overrides RUST_LOG)
    #[arg(long = "verbose", value_enum, global = true, value_name = "LEVEL")]
    pub verbose: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new node
    #[command(after_help = "Examples:\n\n  $ bnode create mynode\n  $ bnode create -d ~/.bitcoin mynode\n  $ bnode create -t mynode")]
    Create {
        /// Directory of the new node, relative to the current directory
        #[arg(value_name = "DIRECTORY")]
        directory: PathBuf,

        /// Specify the data directory
        #[arg(short = 'd', long = "datadir", value_name = "DIR")]
        datadir: Option<PathBuf>,

        /// Enable testnet network
        #[arg(short = 't', long = "testnet")]
        testnet: bool,
    },

    /// Start the current node
    Start {
        /// Directory to load the configuration from
        #[arg(short = 'c', long = "config", value_name = "DIR")]
        config: Option<PathBuf>,
    },

    /// Install services for the current node
    #[command(after_help = "Examples:\n\n  $ bnode install wallet-service\n  $ bnode install insight-api")]
    Install {
        #[arg(value_name = "SERVICES", required = true, num_args = 1..)]
        services: Vec<String>,
    },

    /// Uninstall services of the current node
    #[command(after_help = "Examples:\n\n  $ bnode uninstall wallet-service\n  $ bnode uninstall insight-api")]
    Uninstall {
        #[arg(value_name = "SERVICES", required = true, num_args = 1..)]
        services: Vec<String>,
    },

    /// Call an API method of the running node
    Call {
        #[arg(value_name = "METHOD")]
        method: String,

        /// Method parameters; JSON values are passed typed, anything else as a string
        #[arg(value_name = "PARAMS", num_args = 0.., allow_negative_numbers = true)]
        params: Vec<String>,
    },

    /// Look up a transaction missing from the chain through a temporary node
    #[command(name = "fixmissingtx")]
    FixMissingTx {
        #[arg(value_name = "TXID")]
        txid: String,
    },
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level logging
    Trace,
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    Warn,
    /// Error level logging
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
