use crate::models::{RpcEndpoint, RpcRequest, RpcResponse};
use crate::{Result, RpcError};
use reqwest::{Client, Url};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// The RPC client to call node methods
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a client for `endpoint`
    pub fn new(endpoint: &RpcEndpoint) -> Result<Self> {
        Ok(Self::with_client(Client::builder().build()?, endpoint.url()?))
    }

    /// Creates a client with an existing HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    /// Calls `method` and returns its result; a `null` or missing result is `Value::Null`.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = RpcRequest::new(self.next_id.fetch_add(1, Ordering::Relaxed), method, params);
        debug!(url = %self.base_address, method, "sending rpc request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let content = response.text().await?;

        Self::as_rpc_result(status, &content)
    }

    fn as_rpc_result(status: reqwest::StatusCode, content: &str) -> Result<Value> {
        let response: RpcResponse = serde_json::from_str(content).map_err(|err| {
            if status.is_success() {
                RpcError::InvalidResponse(format!("{err}"))
            } else {
                RpcError::InvalidResponse(format!("HTTP {status}: {content}"))
            }
        })?;

        if let Some(error) = response.error {
            return Err(RpcError::Remote {
                code: error.code,
                message: error.message,
            });
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}
