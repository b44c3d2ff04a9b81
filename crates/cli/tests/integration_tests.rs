//! End-to-end tests of the `bnode` binary.

use assert_cmd::Command as AssertCommand;
use bnode_config::{ConfigFile, CONFIG_FILE_NAME};
use bnode_node::local::store::TxStore;
use bnode_node::{lifecycle, LocalNode, NodeParams, NodeSettings};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

const GENESIS_TX: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff4d04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73ffffffff0100f2052a01000000434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac00000000";
const GENESIS_TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

fn bnode(cwd: &Path) -> AssertCommand {
    let mut cmd = AssertCommand::cargo_bin("bnode").unwrap();
    cmd.current_dir(cwd).env("RUST_LOG", "warn");
    cmd
}

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Creates `<dir>/mynode` through the binary and moves it to a free port.
fn create_node(dir: &TempDir) -> (PathBuf, u16) {
    bnode(dir.path())
        .args(["create", "mynode"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully created node in directory: mynode",
        ));

    let node_dir = dir.path().join("mynode");
    let port = free_port();
    let config_file = node_dir.join(CONFIG_FILE_NAME);
    let mut config = ConfigFile::load(&config_file).unwrap();
    config.port = Some(port);
    config.save(&config_file).unwrap();
    (node_dir, port)
}

#[test]
fn test_no_subcommand_prints_help() {
    let dir = TempDir::new().unwrap();

    bnode(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();

    bnode(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_create_writes_configuration() {
    let dir = TempDir::new().unwrap();

    bnode(dir.path())
        .args(["create", "-t", "mynode"])
        .assert()
        .success();

    let config = ConfigFile::load(&dir.path().join("mynode").join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(config.network, Some(bnode_config::NetworkType::Testnet));
    assert_eq!(config.port, Some(3001));
    assert_eq!(config.services, vec!["bitcoind", "web"]);
    assert!(dir.path().join("mynode").join("data").is_dir());

    bnode(dir.path())
        .args(["create", "mynode"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_install_and_uninstall() {
    let dir = TempDir::new().unwrap();
    let (node_dir, _) = create_node(&dir);

    bnode(&node_dir)
        .args(["install", "insight-api", "wallet-service"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully added service(s): insight-api, wallet-service",
        ));

    bnode(&node_dir.join("data"))
        .args(["uninstall", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully removed service(s): web"));

    let config = ConfigFile::load(&node_dir.join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(
        config.services,
        vec!["bitcoind", "insight-api", "wallet-service"]
    );
}

#[test]
fn test_install_without_configuration() {
    let dir = TempDir::new().unwrap();
    assert!(
        bnode_config::find_config(dir.path()).unwrap().is_none(),
        "a {CONFIG_FILE_NAME} above the temporary directory hides configuration absence"
    );

    bnode(dir.path())
        .args(["install", "insight-api"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Could not find configuration, see `bnode create --help`",
        ));
}

#[test]
fn test_install_requires_service_names() {
    let dir = TempDir::new().unwrap();

    bnode(dir.path()).arg("install").assert().code(2);
}

#[tokio::test]
async fn test_fixmissingtx_finds_transaction() {
    let dir = TempDir::new().unwrap();
    let (node_dir, _) = create_node(&dir);
    {
        let store = TxStore::open(&node_dir.join("data").join("chain")).unwrap();
        store.insert_hex(GENESIS_TX).unwrap();
        store.flush().await.unwrap();
    }

    bnode(&node_dir)
        .args(["fixmissingtx", GENESIS_TXID])
        .assert()
        .success()
        .stdout(predicate::str::contains(GENESIS_TX))
        .stdout(predicate::str::contains(format!(
            "Successfully retrieved tx {GENESIS_TXID} from the chain"
        )));
}

#[test]
fn test_fixmissingtx_reports_missing_transaction() {
    let dir = TempDir::new().unwrap();
    let (node_dir, _) = create_node(&dir);

    bnode(&node_dir)
        .args(["fixmissingtx", GENESIS_TXID])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Successfully").not())
        .stderr(predicate::str::contains(format!(
            "TX with txid {GENESIS_TXID} not found"
        )));
}

#[test]
fn test_fixmissingtx_with_missing_port() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{ "network": "main", "datadir": "./data" }"#,
    )
    .unwrap();

    bnode(dir.path())
        .args(["fixmissingtx", GENESIS_TXID])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid node parameters: missing port"));
}

#[test]
fn test_fixmissingtx_rejects_malformed_txid() {
    let dir = TempDir::new().unwrap();
    let (node_dir, _) = create_node(&dir);

    bnode(&node_dir)
        .args(["fixmissingtx", "zz"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid txid"));

    assert!(!node_dir.join("data").join("chain").exists());
}

#[cfg(unix)]
/// Polls `call getinfo` until the node answers or `timeout` passes.
fn wait_for_rpc(node_dir: &Path, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        let output = bnode(node_dir).args(["call", "getinfo"]).output().unwrap();
        if output.status.success() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    false
}

#[cfg(unix)]
#[test]
fn test_start_runs_until_interrupted() {
    let dir = TempDir::new().unwrap();
    let (node_dir, _) = create_node(&dir);

    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("bnode"))
        .arg("start")
        .arg("-c")
        .arg(&node_dir)
        .current_dir(dir.path())
        .env("RUST_LOG", "warn")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .unwrap();

    if !wait_for_rpc(&node_dir, Duration::from_secs(20)) {
        child.kill().unwrap();
        panic!("node did not answer getinfo after start");
    }

    let pid = libc::pid_t::try_from(child.id()).unwrap();
    assert_eq!(unsafe { libc::kill(pid, libc::SIGINT) }, 0);

    let deadline = Instant::now() + Duration::from_secs(20);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() >= deadline {
            child.kill().unwrap();
            panic!("node did not exit after SIGINT");
        }
        std::thread::sleep(Duration::from_millis(50));
    };
    assert_eq!(status.code(), Some(0));

    bnode(&node_dir).args(["call", "getinfo"]).assert().code(1);
    assert!(TxStore::open(&node_dir.join("data").join("chain")).is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_call_running_node() {
    let dir = TempDir::new().unwrap();
    let (node_dir, port) = create_node(&dir);

    let settings = NodeSettings::build(&NodeParams {
        network: Some(bnode_config::NetworkType::Main),
        port: Some(port),
        prefix: Some(dir.path().join("node-data")),
    })
    .unwrap()
    .in_memory();
    let mut node = LocalNode::new(settings);
    lifecycle::start(&mut node).await.unwrap();

    let cwd = node_dir.clone();
    let output = tokio::task::spawn_blocking(move || {
        bnode(&cwd)
            .args(["call", "sendrawtransaction", GENESIS_TX])
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(GENESIS_TXID));

    let cwd = node_dir.clone();
    let output = tokio::task::spawn_blocking(move || {
        bnode(&cwd).args(["call", "getinfo"]).output().unwrap()
    })
    .await
    .unwrap();
    assert!(output.status.success());
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["transactions"], 1);

    let cwd = node_dir.clone();
    let output = tokio::task::spawn_blocking(move || {
        bnode(&cwd).args(["call", "nosuchmethod", "1"]).output().unwrap()
    })
    .await
    .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Method not found"));

    lifecycle::stop(&mut node).await.unwrap();
}

#[test]
fn test_call_without_running_node() {
    let dir = TempDir::new().unwrap();
    let (node_dir, _) = create_node(&dir);

    bnode(&node_dir)
        .args(["call", "getinfo"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error:"));
}
