use bnode_config::ConfigError;
use bnode_node::local::store::StoreError;
use bnode_node::NodeError;
use bnode_rpc_client::RpcError;
use std::process::ExitCode;
use thiserror::Error;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    InvalidTxid(#[from] StoreError),

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        CliError::Io { context, source }
    }

    /// Process exit code reported for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
