//! JSON-RPC endpoint of the built-in node.

use super::store::{TxStore, Txid};
use crate::NodeSettings;
use anyhow::Context;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use bnode_config::NetworkType;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const INVALID_PARAMS: i32 = -32602;
const METHOD_NOT_FOUND: i32 = -32601;
const INTERNAL_ERROR: i32 = -32603;

/// RPC method request
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
    #[serde(default)]
    pub id: Value,
}

/// RPC method response
#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
    pub id: Value,
}

/// RPC error response
#[derive(Debug, Serialize)]
pub struct RpcErrorObject {
    pub code: i32,
    pub message: String,
}

impl RpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Value, error: RpcErrorObject) -> Self {
        Self {
            jsonrpc: "2.0",
            result: None,
            error: Some(error),
            id,
        }
    }
}

#[derive(Clone)]
struct ServerState {
    store: TxStore,
    network: NetworkType,
    port: u16,
}

/// Running RPC server; stopped with [`RpcServer::shutdown`].
pub struct RpcServer {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RpcServer {
    pub async fn bind(addr: SocketAddr, store: TxStore, settings: &NodeSettings) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind RPC endpoint on {addr}"))?;
        let local_addr = listener.local_addr()?;

        let state = ServerState {
            store,
            network: settings.network,
            port: settings.port,
        };
        let app = Router::new()
            .route("/", post(handle_rpc))
            .with_state(state);

        let (shutdown, signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await
        });

        info!(address = %local_addr, "rpc endpoint listening");
        Ok(Self {
            local_addr,
            shutdown: Some(shutdown),
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting requests and waits for the server task to finish.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        self.task
            .await
            .context("rpc server task panicked")?
            .context("rpc server failed")?;
        info!(address = %self.local_addr, "rpc endpoint closed");
        Ok(())
    }
}

async fn handle_rpc(
    State(state): State<ServerState>,
    Json(request): Json<RpcRequest>,
) -> Json<RpcResponse> {
    debug!(method = %request.method, "rpc request");
    let response = match dispatch(&state, &request.method, &request.params) {
        Ok(result) => RpcResponse::success(request.id, result),
        Err(error) => RpcResponse::failure(request.id, error),
    };
    Json(response)
}

fn dispatch(state: &ServerState, method: &str, params: &[Value]) -> Result<Value, RpcErrorObject> {
    match method {
        "getinfo" => Ok(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "network": state.network.as_str(),
            "port": state.port,
            "transactions": state.store.len(),
        })),
        "gettransaction" => {
            let txid: Txid = string_param(params, 0, "txid")?
                .parse()
                .map_err(|err| invalid_params(format!("{err}")))?;
            let tx = state.store.get(&txid).map_err(internal)?;
            Ok(tx
                .map(|tx| json!({ "txid": tx.txid, "hex": tx.hex }))
                .unwrap_or(Value::Null))
        }
        "sendrawtransaction" => {
            let raw = string_param(params, 0, "hex")?;
            let txid = state
                .store
                .insert_hex(raw)
                .map_err(|err| invalid_params(format!("{err}")))?;
            info!(%txid, "transaction stored");
            Ok(Value::String(txid.to_string()))
        }
        other => Err(RpcErrorObject {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {other}"),
        }),
    }
}

fn string_param<'a>(params: &'a [Value], index: usize, name: &str) -> Result<&'a str, RpcErrorObject> {
    params
        .get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid_params(format!("expected string parameter '{name}' at position {index}")))
}

fn invalid_params(message: String) -> RpcErrorObject {
    RpcErrorObject {
        code: INVALID_PARAMS,
        message,
    }
}

fn internal(err: impl std::fmt::Display) -> RpcErrorObject {
    RpcErrorObject {
        code: INTERNAL_ERROR,
        message: err.to_string(),
    }
}
