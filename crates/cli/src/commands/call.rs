use super::CommandContext;
use crate::error::CliResult;
use crate::params::parse_params_with_json;
use bnode_config::DEFAULT_PORT;
use bnode_rpc_client::{RpcClient, RpcEndpoint};
use tracing::debug;

/// `bnode call <method> [params...]` against the node on the configured port.
pub async fn run(ctx: &CommandContext, method: &str, params: &[String]) -> CliResult<()> {
    let config = ctx.resolve_config(None)?;
    let endpoint = RpcEndpoint::local(config.port().unwrap_or(DEFAULT_PORT));
    let params = parse_params_with_json(params);
    debug!(target: "bnode", port = endpoint.port, method, "calling node");

    let client = RpcClient::new(&endpoint)?;
    let result = client.call(method, params).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
