use std::fmt;
use thiserror::Error;

/// Lifecycle steps of a node, in start/stop order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleStep {
    Open,
    Connect,
    StopSync,
    Disconnect,
}

impl fmt::Display for LifecycleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleStep::Open => write!(f, "open"),
            LifecycleStep::Connect => write!(f, "connect"),
            LifecycleStep::StopSync => write!(f, "stop_sync"),
            LifecycleStep::Disconnect => write!(f, "disconnect"),
        }
    }
}

/// Node control errors
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("invalid node parameters: missing {}", .missing.join(", "))]
    InvalidParameters { missing: Vec<&'static str> },

    #[error("node {step} failed: {source}")]
    Lifecycle {
        step: LifecycleStep,
        #[source]
        source: anyhow::Error,
    },

    #[error("lookup of tx {txid} failed: {source}")]
    Lookup {
        txid: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("TX with txid {txid} not found")]
    TransactionNotFound { txid: String },
}

impl NodeError {
    /// The lifecycle step that failed, for [`NodeError::Lifecycle`].
    pub fn lifecycle_step(&self) -> Option<LifecycleStep> {
        match self {
            NodeError::Lifecycle { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Result type for node control operations
pub type Result<T> = std::result::Result<T, NodeError>;
