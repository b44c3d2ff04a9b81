//! Node settings and their validation.

use crate::{NodeError, Result};
use bnode_config::{ConfigInfo, NetworkType};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tracing::Level;

/// Raw node parameters as read from a configuration, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeParams {
    pub network: Option<NetworkType>,
    pub port: Option<u16>,
    /// Root directory of the node's data
    pub prefix: Option<PathBuf>,
}

impl NodeParams {
    /// Draws `datadir`, `port` and `network` from a resolved configuration.
    pub fn from_config(info: &ConfigInfo) -> Self {
        Self {
            network: info.network(),
            port: info.port(),
            prefix: info.data_dir(),
        }
    }
}

/// Storage backend of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEngine {
    /// Persistent sled database under the node prefix
    Sled,
    /// Temporary storage discarded when the node is dropped
    Memory,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Console output enabled
    pub console: bool,
    pub level: Level,
}

/// Validated node configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSettings {
    pub network: NetworkType,
    pub port: u16,
    pub prefix: PathBuf,
    pub storage_engine: StorageEngine,
    pub checkpoints: bool,
    pub listen: bool,
    pub persistent: bool,
    pub workers: bool,
    pub in_memory: bool,
    pub logging: LogSettings,
}

impl NodeSettings {
    /// Validates `params` and applies the fixed node defaults.
    ///
    /// `network`, `port` and `prefix` must all be present; a zero port or an
    /// empty prefix counts as missing.
    pub fn build(params: &NodeParams) -> Result<Self> {
        let port = params.port.filter(|port| *port != 0);
        let prefix = params
            .prefix
            .clone()
            .filter(|prefix| !prefix.as_os_str().is_empty());

        match (params.network, port, prefix) {
            (Some(network), Some(port), Some(prefix)) => Ok(Self {
                network,
                port,
                prefix,
                storage_engine: StorageEngine::Sled,
                checkpoints: true,
                listen: true,
                persistent: true,
                workers: true,
                in_memory: false,
                logging: LogSettings {
                    console: true,
                    level: Level::INFO,
                },
            }),
            (network, port, prefix) => {
                let mut missing = Vec::new();
                if network.is_none() {
                    missing.push("network");
                }
                if port.is_none() {
                    missing.push("port");
                }
                if prefix.is_none() {
                    missing.push("prefix");
                }
                Err(NodeError::InvalidParameters { missing })
            }
        }
    }

    /// Switches to temporary storage.
    pub fn in_memory(mut self) -> Self {
        self.storage_engine = StorageEngine::Memory;
        self.persistent = false;
        self.in_memory = true;
        self
    }

    pub fn with_listen(mut self, listen: bool) -> Self {
        self.listen = listen;
        self
    }

    /// Location of the chain database. Non-main networks get their own subdirectory.
    pub fn chain_path(&self) -> PathBuf {
        if self.network.is_main() {
            self.prefix.join("chain")
        } else {
            self.prefix.join(self.network.as_str()).join("chain")
        }
    }

    /// Address the node's RPC endpoint binds to.
    pub fn rpc_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
