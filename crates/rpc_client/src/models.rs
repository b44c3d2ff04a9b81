use crate::RpcError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Where a node's RPC endpoint listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEndpoint {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl RpcEndpoint {
    /// `http://localhost:<port>`
    pub fn local(port: u16) -> Self {
        Self {
            protocol: "http".to_string(),
            host: "localhost".to_string(),
            port,
        }
    }

    pub fn url(&self) -> Result<Url, RpcError> {
        let raw = format!("{}://{}:{}/", self.protocol, self.host, self.port);
        Url::parse(&raw).map_err(|source| RpcError::InvalidEndpoint { url: raw, source })
    }
}

/// JSON-RPC request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: Value,
}

/// Error member of a JSON-RPC response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}
