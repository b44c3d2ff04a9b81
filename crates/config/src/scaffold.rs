//! Writes node installations and their service lists to disk.

use crate::{
    ConfigError, ConfigFile, ConfigInfo, NetworkType, Result, CONFIG_FILE_NAME, DEFAULT_DATA_DIR,
    DEFAULT_PORT, DEFAULT_SERVICES,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Persistence of node installations.
///
/// `config_path` arguments name the directory holding the configuration file,
/// as found in [`ConfigInfo::path`].
pub trait Scaffold {
    /// Creates a new installation and returns its directory.
    fn create(&self, options: &CreateOptions) -> Result<PathBuf>;

    /// Registers `services` with the configuration in `config_path`.
    fn add(&self, config_path: &Path, services: &[String]) -> Result<()>;

    /// Unregisters `services` from the configuration in `config_path`.
    fn remove(&self, config_path: &Path, services: &[String]) -> Result<()>;
}

/// Options for [`Scaffold::create`]
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Directory the installation directory is created in
    pub cwd: PathBuf,
    /// Installation directory, relative to `cwd` unless absolute
    pub dirname: PathBuf,
    /// Data directory; defaults to `./data` inside the installation
    pub datadir: Option<PathBuf>,
    pub network: NetworkType,
}

/// [`Scaffold`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScaffold;

impl FsScaffold {
    pub fn new() -> Self {
        Self
    }

    fn update<F>(&self, config_path: &Path, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile),
    {
        let file = config_path.join(CONFIG_FILE_NAME);
        let mut config = ConfigFile::load(&file)?;
        apply(&mut config);
        config.save(&file)
    }
}

impl Scaffold for FsScaffold {
    fn create(&self, options: &CreateOptions) -> Result<PathBuf> {
        let node_dir = options.cwd.join(&options.dirname);
        let config_file = node_dir.join(CONFIG_FILE_NAME);
        if config_file.exists() {
            return Err(ConfigError::AlreadyExists(node_dir));
        }

        std::fs::create_dir_all(&node_dir).map_err(|err| ConfigError::io(&node_dir, err))?;

        let datadir = match &options.datadir {
            Some(dir) => options.cwd.join(dir).to_string_lossy().into_owned(),
            None => DEFAULT_DATA_DIR.to_string(),
        };

        let info = ConfigInfo {
            path: node_dir.clone(),
            config: ConfigFile {
                network: Some(options.network),
                port: Some(DEFAULT_PORT),
                datadir: Some(datadir),
                services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            },
        };
        info.config.save(&config_file)?;

        if let Some(data_dir) = info.data_dir() {
            std::fs::create_dir_all(&data_dir).map_err(|err| ConfigError::io(&data_dir, err))?;
            debug!(path = %data_dir.display(), "created data directory");
        }

        info!(
            path = %node_dir.display(),
            network = %options.network,
            "created node configuration"
        );
        Ok(node_dir)
    }

    fn add(&self, config_path: &Path, services: &[String]) -> Result<()> {
        self.update(config_path, |config| config.add_services(services))
    }

    fn remove(&self, config_path: &Path, services: &[String]) -> Result<()> {
        self.update(config_path, |config| config.remove_services(services))
    }
}
