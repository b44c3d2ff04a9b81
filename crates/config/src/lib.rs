//! bnode Configuration Module
//!
//! This module locates node configuration on disk, synthesizes defaults when
//! none exists and scaffolds new node installations and their services.

pub mod error;
pub mod file;
pub mod network;
pub mod resolver;
pub mod scaffold;
pub mod services;

pub use error::{ConfigError, Result};
pub use file::ConfigFile;
pub use network::NetworkType;
pub use resolver::{
    default_config, find_config, require_config, resolve, ConfigInfo, DefaultConfigOptions,
};
pub use scaffold::{CreateOptions, FsScaffold, Scaffold};
pub use services::ServiceInstaller;

/// Name of the configuration file looked up by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "bnode.json";

/// Directory under the user's home used by the synthesized default configuration.
pub const DEFAULT_HOME_DIR: &str = ".bnode";

/// Default node port (RPC endpoint of a started node).
pub const DEFAULT_PORT: u16 = 3001;

/// Default data directory, relative to the configuration directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Services registered by every new configuration.
pub const DEFAULT_SERVICES: &[&str] = &["bitcoind", "web"];

/// A fresh temporary directory with no configuration at or above it.
#[cfg(test)]
pub(crate) fn isolated_dir() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().expect("temporary directory");
    assert!(
        find_config(dir.path()).expect("readable ancestors").is_none(),
        "a {CONFIG_FILE_NAME} above {} makes configuration-absence tests meaningless",
        dir.path().display()
    );
    dir
}
