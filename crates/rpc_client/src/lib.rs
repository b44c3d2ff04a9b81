//! bnode RPC client
//!
//! A thin JSON-RPC 2.0 client for a node's local HTTP endpoint. Transport and
//! remote-method failures are passed through unchanged; there are no retries
//! and no timeouts beyond those of the HTTP stack.

mod error;
mod models;
mod rpc_client;

pub use error::RpcError;
pub use models::{RpcEndpoint, RpcErrorObject, RpcRequest, RpcResponse};
pub use rpc_client::RpcClient;

/// Result type for RPC operations
pub type Result<T> = std::result::Result<T, RpcError>;
