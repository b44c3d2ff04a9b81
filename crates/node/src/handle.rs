use crate::NodeSettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A transaction as returned by a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Display (byte-reversed) hex of the transaction hash
    pub txid: String,
    /// Raw transaction bytes, hex encoded
    pub hex: String,
}

/// Lifecycle states of a node handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unopened,
    Opened,
    Connected,
    Stopping,
    Disconnected,
}

/// A full node driven by the lifecycle controller.
///
/// Handles are single-use and exclusively owned by the flow that created them.
/// Use [`crate::lifecycle::start`] and [`crate::lifecycle::stop`] rather than
/// calling the steps directly; they enforce the step order.
#[async_trait]
pub trait FullNode: Send + Sync {
    async fn open(&mut self) -> anyhow::Result<()>;

    async fn connect(&mut self) -> anyhow::Result<()>;

    /// Completes synchronization and flushes pending state.
    async fn stop_sync(&mut self) -> anyhow::Result<()>;

    async fn disconnect(&mut self) -> anyhow::Result<()>;

    /// Looks up a transaction; `Ok(None)` means the node does not know it.
    async fn get_tx(&self, txid: &str) -> anyhow::Result<Option<Transaction>>;
}

/// Builds fresh node handles from validated settings.
pub trait NodeFactory {
    type Node: FullNode;

    fn create(&self, settings: NodeSettings) -> Self::Node;
}
