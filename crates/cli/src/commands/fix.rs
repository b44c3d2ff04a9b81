use super::CommandContext;
use crate::error::CliResult;
use bnode_node::local::store::Txid;
use bnode_node::{fix_tx, LocalNodeFactory, NodeParams};
use tracing::warn;

/// `bnode fixmissingtx <txid>`
///
/// Runs a temporary node over the configured data directory and reads the
/// transaction from it. The node is stopped before anything is reported. A
/// malformed txid is rejected before any node is started.
pub async fn run(ctx: &CommandContext, txid: &str) -> CliResult<()> {
    let txid: Txid = txid.parse()?;
    let config = ctx.resolve_config(None)?;
    let params = NodeParams::from_config(&config);

    let outcome = fix_tx(LocalNodeFactory, &txid.to_string(), &params).await;
    if let Some(err) = &outcome.cleanup_error {
        warn!(target: "bnode", error = %err, "temporary node did not stop cleanly");
    }

    let tx = outcome.into_result()?;
    println!("{}", serde_json::to_string_pretty(&tx)?);
    println!("Successfully retrieved tx {} from the chain", tx.txid);
    Ok(())
}
