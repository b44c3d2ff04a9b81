//! Transaction repair flow.
//!
//! Reads one transaction through a temporary node: validate the parameters,
//! start a fresh node, query it, and stop it again before reporting. Once the
//! node started it is stopped exactly once, whatever the query returned. A
//! failed stop is kept in [`RepairOutcome::cleanup_error`] for the caller to
//! report; it never replaces the query outcome.

use crate::{
    lifecycle, FullNode, NodeError, NodeFactory, NodeParams, NodeSettings, Result, Transaction,
};
use tracing::{debug, info};

/// States of a repair run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairState {
    Idle,
    Validating,
    Starting,
    Querying,
    Stopping,
    Done,
    Failed,
}

/// Result of a repair run
#[derive(Debug)]
pub struct RepairOutcome {
    /// The transaction, or the primary failure
    pub result: Result<Transaction>,
    /// Failure of the stop step, if it ran and failed
    pub cleanup_error: Option<NodeError>,
    pub final_state: RepairState,
}

impl RepairOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<Transaction> {
        self.result
    }
}

/// Single-use repair flow over nodes built by `F`.
pub struct TxRepairFlow<F> {
    factory: F,
    state: RepairState,
}

impl<F: NodeFactory> TxRepairFlow<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            state: RepairState::Idle,
        }
    }

    fn transition(&mut self, next: RepairState) {
        debug!(from = ?self.state, to = ?next, "repair flow transition");
        self.state = next;
    }

    fn fail(mut self, error: NodeError) -> RepairOutcome {
        self.transition(RepairState::Failed);
        RepairOutcome {
            result: Err(error),
            cleanup_error: None,
            final_state: self.state,
        }
    }

    pub async fn run(mut self, txid: &str, params: &NodeParams) -> RepairOutcome {
        self.transition(RepairState::Validating);
        let settings = match NodeSettings::build(params) {
            Ok(settings) => settings,
            Err(err) => return self.fail(err),
        };

        self.transition(RepairState::Starting);
        info!(
            network = %settings.network,
            port = settings.port,
            prefix = %settings.prefix.display(),
            "starting temporary node"
        );
        let mut node = self.factory.create(settings);
        if let Err(err) = lifecycle::start(&mut node).await {
            return self.fail(err);
        }

        self.transition(RepairState::Querying);
        let lookup = node.get_tx(txid).await;

        self.transition(RepairState::Stopping);
        let cleanup_error = lifecycle::stop(&mut node).await.err();

        let result = match lookup {
            Ok(Some(tx)) => Ok(tx),
            Ok(None) => Err(NodeError::TransactionNotFound {
                txid: txid.to_string(),
            }),
            Err(source) => Err(NodeError::Lookup {
                txid: txid.to_string(),
                source,
            }),
        };

        self.transition(if result.is_ok() {
            RepairState::Done
        } else {
            RepairState::Failed
        });

        RepairOutcome {
            result,
            cleanup_error,
            final_state: self.state,
        }
    }
}

/// Runs a [`TxRepairFlow`] over `factory`.
pub async fn fix_tx<F: NodeFactory>(factory: F, txid: &str, params: &NodeParams) -> RepairOutcome {
    TxRepairFlow::new(factory).run(txid, params).await
}
