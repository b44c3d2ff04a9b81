//! Built-in full node.
//!
//! Keeps raw transactions in a sled database under the node prefix and, once
//! connected, serves them over JSON-RPC on the configured port. Peer
//! networking and validation are out of scope; transactions arrive through
//! `sendrawtransaction`.

pub mod rpc_server;
pub mod store;

use crate::{FullNode, NodeFactory, NodeSettings, NodeState, Transaction};
use anyhow::{bail, Context};
use async_trait::async_trait;
use rpc_server::RpcServer;
use std::net::SocketAddr;
use store::{TxStore, Txid};
use tracing::{debug, info};

/// Storage-backed [`FullNode`] serving JSON-RPC
pub struct LocalNode {
    settings: NodeSettings,
    state: NodeState,
    store: Option<TxStore>,
    rpc: Option<RpcServer>,
}

impl LocalNode {
    pub fn new(settings: NodeSettings) -> Self {
        Self {
            settings,
            state: NodeState::Unopened,
            store: None,
            rpc: None,
        }
    }

    pub fn settings(&self) -> &NodeSettings {
        &self.settings
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Address of the RPC endpoint while connected and listening.
    pub fn rpc_addr(&self) -> Option<SocketAddr> {
        self.rpc.as_ref().map(RpcServer::local_addr)
    }

    fn store(&self) -> anyhow::Result<&TxStore> {
        self.store.as_ref().context("node store is not open")
    }

    fn expect_state(&self, expected: &[NodeState], action: &str) -> anyhow::Result<()> {
        if !expected.contains(&self.state) {
            bail!("cannot {action} a node in state {:?}", self.state);
        }
        Ok(())
    }
}

#[async_trait]
impl FullNode for LocalNode {
    async fn open(&mut self) -> anyhow::Result<()> {
        self.expect_state(&[NodeState::Unopened], "open")?;

        let store = if self.settings.in_memory {
            TxStore::temporary()?
        } else {
            let path = self.settings.chain_path();
            std::fs::create_dir_all(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            TxStore::open(&path)
                .with_context(|| format!("failed to open chain database {}", path.display()))?
        };

        info!(
            network = %self.settings.network,
            prefix = %self.settings.prefix.display(),
            engine = ?self.settings.storage_engine,
            checkpoints = self.settings.checkpoints,
            workers = self.settings.workers,
            transactions = store.len(),
            "node opened"
        );
        self.store = Some(store);
        self.state = NodeState::Opened;
        Ok(())
    }

    async fn connect(&mut self) -> anyhow::Result<()> {
        self.expect_state(&[NodeState::Opened], "connect")?;

        if self.settings.listen {
            let store = self.store()?.clone();
            let server = RpcServer::bind(self.settings.rpc_addr(), store, &self.settings).await?;
            self.rpc = Some(server);
        } else {
            info!("listening disabled, rpc endpoint not started");
        }

        self.state = NodeState::Connected;
        Ok(())
    }

    async fn stop_sync(&mut self) -> anyhow::Result<()> {
        self.expect_state(&[NodeState::Connected], "stop syncing")?;
        self.state = NodeState::Stopping;

        let written = self.store()?.flush().await?;
        debug!(bytes = written, "chain database flushed");
        Ok(())
    }

    async fn disconnect(&mut self) -> anyhow::Result<()> {
        self.expect_state(&[NodeState::Connected, NodeState::Stopping], "disconnect")?;

        if let Some(server) = self.rpc.take() {
            server.shutdown().await?;
        }
        // Releases the database lock once the server's handle is gone too.
        self.store = None;
        self.state = NodeState::Disconnected;
        info!("node disconnected");
        Ok(())
    }

    async fn get_tx(&self, txid: &str) -> anyhow::Result<Option<Transaction>> {
        self.expect_state(&[NodeState::Connected], "query")?;
        let txid: Txid = txid.parse()?;
        Ok(self.store()?.get(&txid)?)
    }
}

/// Builds [`LocalNode`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalNodeFactory;

impl NodeFactory for LocalNodeFactory {
    type Node = LocalNode;

    fn create(&self, settings: NodeSettings) -> LocalNode {
        LocalNode::new(settings)
    }
}
