//! Instrumented fake node shared by the lifecycle and repair tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bnode_node::{FullNode, NodeFactory, NodeSettings, Transaction};
use std::sync::{Arc, Mutex};

/// Ordered log of node events
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| e.as_str() == event).count()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.events().iter().any(|e| e.starts_with(prefix))
    }
}

/// What the fake node does
#[derive(Clone, Default)]
pub struct Behavior {
    /// Lifecycle step that fails: "open", "connect", "stop_sync" or "disconnect"
    pub fail_on: Option<&'static str>,
    /// Transaction returned by `get_tx`
    pub tx: Option<Transaction>,
    pub lookup_fails: bool,
}

pub struct FakeNode {
    recorder: Recorder,
    behavior: Behavior,
}

impl FakeNode {
    pub fn new(recorder: Recorder, behavior: Behavior) -> Self {
        Self { recorder, behavior }
    }

    async fn step(&self, name: &'static str) -> anyhow::Result<()> {
        self.recorder.push(format!("{name}:start"));
        tokio::task::yield_now().await;
        if self.behavior.fail_on == Some(name) {
            self.recorder.push(format!("{name}:failed"));
            anyhow::bail!("{name} refused");
        }
        self.recorder.push(format!("{name}:end"));
        Ok(())
    }
}

#[async_trait]
impl FullNode for FakeNode {
    async fn open(&mut self) -> anyhow::Result<()> {
        self.step("open").await
    }

    async fn connect(&mut self) -> anyhow::Result<()> {
        self.step("connect").await
    }

    async fn stop_sync(&mut self) -> anyhow::Result<()> {
        self.step("stop_sync").await
    }

    async fn disconnect(&mut self) -> anyhow::Result<()> {
        self.step("disconnect").await
    }

    async fn get_tx(&self, txid: &str) -> anyhow::Result<Option<Transaction>> {
        self.recorder.push(format!("get_tx:{txid}"));
        tokio::task::yield_now().await;
        if self.behavior.lookup_fails {
            anyhow::bail!("lookup transport closed");
        }
        Ok(self.behavior.tx.clone())
    }
}

/// Factory handing out [`FakeNode`]s that share one recorder
#[derive(Clone, Default)]
pub struct FakeFactory {
    pub recorder: Recorder,
    pub behavior: Behavior,
    pub created: Arc<Mutex<Vec<NodeSettings>>>,
}

impl FakeFactory {
    pub fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            ..Default::default()
        }
    }

    pub fn created(&self) -> Vec<NodeSettings> {
        self.created.lock().unwrap().clone()
    }
}

impl NodeFactory for FakeFactory {
    type Node = FakeNode;

    fn create(&self, settings: NodeSettings) -> FakeNode {
        self.recorder.push("create");
        self.created.lock().unwrap().push(settings);
        FakeNode::new(self.recorder.clone(), self.behavior.clone())
    }
}

pub fn sample_tx() -> Transaction {
    Transaction {
        txid: "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b".to_string(),
        hex: "01000000".to_string(),
    }
}

/// Log output captured from a scoped subscriber
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Routes events of the current thread here until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
