//! Configuration discovery.
//!
//! A configuration is looked up by walking from a start directory towards the
//! filesystem root. Flows that can run without an installation fall back to
//! [`default_config`]; flows that mutate an installation use
//! [`require_config`] and treat absence as an error.

use crate::file::dedup_services;
use crate::{
    ConfigError, ConfigFile, NetworkType, Result, CONFIG_FILE_NAME, DEFAULT_DATA_DIR,
    DEFAULT_HOME_DIR, DEFAULT_PORT, DEFAULT_SERVICES,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A configuration together with the directory it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigInfo {
    /// Directory holding (or owning, for synthesized defaults) the configuration
    pub path: PathBuf,
    pub config: ConfigFile,
}

impl ConfigInfo {
    pub fn config_file(&self) -> PathBuf {
        self.path.join(CONFIG_FILE_NAME)
    }

    pub fn network(&self) -> Option<NetworkType> {
        self.config.network
    }

    pub fn port(&self) -> Option<u16> {
        self.config.port
    }

    /// The data directory, resolved against [`ConfigInfo::path`] when relative.
    pub fn data_dir(&self) -> Option<PathBuf> {
        let datadir = self.config.datadir.as_deref()?;
        if datadir.is_empty() {
            return None;
        }

        let datadir = Path::new(datadir);
        if datadir.is_absolute() {
            Some(datadir.to_path_buf())
        } else {
            Some(self.path.join(datadir.strip_prefix(".").unwrap_or(datadir)))
        }
    }
}

/// Options for synthesizing a default configuration
#[derive(Debug, Clone, Default)]
pub struct DefaultConfigOptions {
    /// Services registered on top of [`DEFAULT_SERVICES`]
    pub additional_services: Vec<String>,
}

/// Searches `start` and its ancestors for a configuration file.
pub fn find_config(start: &Path) -> Result<Option<ConfigInfo>> {
    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "found node configuration");
            let config = ConfigFile::load(&candidate)?;
            return Ok(Some(ConfigInfo {
                path: dir.to_path_buf(),
                config,
            }));
        }
    }

    Ok(None)
}

/// Like [`find_config`], but absence is a [`ConfigError::NotFound`].
pub fn require_config(start: &Path) -> Result<ConfigInfo> {
    find_config(start)?.ok_or_else(|| ConfigError::NotFound {
        searched_from: start.to_path_buf(),
    })
}

/// Builds the default configuration in memory. Nothing is written to disk.
pub fn default_config(options: &DefaultConfigOptions) -> ConfigInfo {
    let path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HOME_DIR);

    let services = dedup_services(
        DEFAULT_SERVICES
            .iter()
            .map(|name| name.to_string())
            .chain(options.additional_services.iter().cloned()),
    );

    ConfigInfo {
        path,
        config: ConfigFile {
            network: Some(NetworkType::Main),
            port: Some(DEFAULT_PORT),
            datadir: Some(DEFAULT_DATA_DIR.to_string()),
            services,
        },
    }
}

/// Resolves the configuration for a command.
///
/// `explicit` is resolved against `cwd` when relative; without it the search
/// starts at `cwd`. Falls back to [`default_config`] when nothing is found.
pub fn resolve(
    explicit: Option<&Path>,
    cwd: &Path,
    options: &DefaultConfigOptions,
) -> Result<ConfigInfo> {
    let start = match explicit {
        Some(path) => cwd.join(path),
        None => cwd.to_path_buf(),
    };

    match find_config(&start)? {
        Some(info) => Ok(info),
        None => {
            info!(
                searched_from = %start.display(),
                "no node configuration found, using defaults"
            );
            Ok(default_config(options))
        }
    }
}
