//! Ordered start and stop of a node.
//!
//! `start` runs `open` then `connect`; `stop` runs `stop_sync` then
//! `disconnect`. Each step is awaited before the next one begins and the first
//! failure aborts the sequence. Neither operation is transactional: a failure
//! part way leaves the node partially started or stopped and the caller decides
//! what cleanup to attempt. Nothing here retries.

use crate::{FullNode, LifecycleStep, NodeError, Result};
use std::future::Future;
use tracing::debug;

async fn run_step<F>(step: LifecycleStep, operation: F) -> Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    debug!(%step, "node lifecycle step");
    operation
        .await
        .map_err(|source| NodeError::Lifecycle { step, source })
}

/// Opens then connects `node`.
pub async fn start<N>(node: &mut N) -> Result<()>
where
    N: FullNode + ?Sized,
{
    run_step(LifecycleStep::Open, node.open()).await?;
    run_step(LifecycleStep::Connect, node.connect()).await?;
    debug!("node started");
    Ok(())
}

/// Finishes synchronization then disconnects `node`.
pub async fn stop<N>(node: &mut N) -> Result<()>
where
    N: FullNode + ?Sized,
{
    run_step(LifecycleStep::StopSync, node.stop_sync()).await?;
    run_step(LifecycleStep::Disconnect, node.disconnect()).await?;
    debug!("node stopped");
    Ok(())
}
