//! bnode node control
//!
//! Drives a full node through its lifecycle. A node is any [`FullNode`]
//! implementation; the crate ships [`local::LocalNode`], a storage-backed node
//! serving JSON-RPC, and uses it for `bnode start` and `bnode fixmissingtx`.
//!
//! ```text
//! NodeParams --build--> NodeSettings --NodeFactory--> FullNode
//!                                                       |
//!                    lifecycle::start (open, connect)   |
//!                    lifecycle::stop  (stop_sync, disconnect)
//! ```

pub mod error;
pub mod handle;
pub mod lifecycle;
pub mod local;
pub mod repair;
pub mod settings;

pub use error::{LifecycleStep, NodeError, Result};
pub use handle::{FullNode, NodeFactory, NodeState, Transaction};
pub use local::{LocalNode, LocalNodeFactory};
pub use repair::{fix_tx, RepairOutcome, RepairState, TxRepairFlow};
pub use settings::{LogSettings, NodeParams, NodeSettings, StorageEngine};
