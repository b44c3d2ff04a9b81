//! On-disk configuration file (`bnode.json`).

use crate::{ConfigError, NetworkType, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of a node configuration file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Network the node runs on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkType>,
    /// Node port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Data directory, relative to the directory holding the file unless absolute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datadir: Option<String>,
    /// Installed services, in installation order
    #[serde(default)]
    pub services: Vec<String>,
}

impl ConfigFile {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        content.push('\n');

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| ConfigError::io(parent, err))?;
        }

        std::fs::write(path, content).map_err(|err| ConfigError::io(path, err))
    }

    /// Appends every name not already installed.
    pub fn add_services(&mut self, names: &[String]) {
        for name in names {
            if !self.services.contains(name) {
                self.services.push(name.clone());
            }
        }
    }

    pub fn remove_services(&mut self, names: &[String]) {
        self.services.retain(|installed| !names.contains(installed));
    }
}

/// Collapses duplicate service names, keeping first-seen order.
pub fn dedup_services<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut unique: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}
