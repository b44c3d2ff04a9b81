use super::CommandContext;
use crate::error::{CliError, CliResult};
use bnode_node::{lifecycle, FullNode, LocalNodeFactory, NodeFactory, NodeParams, NodeSettings};
use std::future::Future;
use std::io;
use std::path::Path;
use tracing::{error, info};

/// `bnode start [--config <dir>]`
///
/// Runs the node until SIGINT or SIGTERM (Ctrl+C elsewhere), then stops it in
/// order. The signal listener is installed before the node starts.
pub async fn run(ctx: &CommandContext, config: Option<&Path>) -> CliResult<()> {
    let config = ctx.resolve_config(config)?;
    let settings = NodeSettings::build(&NodeParams::from_config(&config))?;

    info!(
        target: "bnode",
        config = %config.path.display(),
        services = %config.config.services.join(", "),
        "using node configuration"
    );

    let shutdown = shutdown_signal()?;
    let mut node = LocalNodeFactory.create(settings);
    lifecycle::start(&mut node).await?;

    info!(
        target: "bnode",
        network = %node.settings().network,
        rpc = ?node.rpc_addr(),
        "bnode node started; press Ctrl+C to exit"
    );

    serve_until(&mut node, shutdown).await
}

/// Waits for `shutdown`, then stops `node`.
///
/// The node is stopped even when waiting failed; that failure is returned
/// afterwards.
async fn serve_until<N, S>(node: &mut N, shutdown: S) -> CliResult<()>
where
    N: FullNode + ?Sized,
    S: Future<Output = io::Result<&'static str>>,
{
    let received = shutdown.await;
    match &received {
        Ok(signal) => info!(target: "bnode", signal, "shutdown signal received"),
        Err(err) => error!(target: "bnode", error = %err, "failed to wait for shutdown signal"),
    }

    lifecycle::stop(node).await?;
    info!(target: "bnode", "node stopped, exiting");

    received
        .map(|_| ())
        .map_err(|err| CliError::io("failed to wait for shutdown signal", err))
}

#[cfg(unix)]
fn shutdown_signal() -> CliResult<impl Future<Output = io::Result<&'static str>>> {
    use tokio::signal::unix::{signal, SignalKind};

    let install = |kind: SignalKind| {
        signal(kind).map_err(|err| CliError::io("failed to install signal handler", err))
    };
    let mut interrupt = install(SignalKind::interrupt())?;
    let mut terminate = install(SignalKind::terminate())?;

    Ok(async move {
        let received = tokio::select! {
            received = interrupt.recv() => received.map(|()| "SIGINT"),
            received = terminate.recv() => received.map(|()| "SIGTERM"),
        };
        received.ok_or_else(|| io::Error::new(io::ErrorKind::Other, "signal stream closed"))
    })
}

#[cfg(not(unix))]
fn shutdown_signal() -> CliResult<impl Future<Output = io::Result<&'static str>>> {
    Ok(async { tokio::signal::ctrl_c().await.map(|()| "Ctrl+C") })
}
