use crate::file::dedup_services;
use crate::{require_config, Result, Scaffold};
use std::path::Path;
use tracing::info;

/// Installs and removes services of an existing node installation.
///
/// Both operations require a configuration at or above `location`; the
/// scaffold is never called when none exists.
pub struct ServiceInstaller<S> {
    scaffold: S,
}

impl<S: Scaffold> ServiceInstaller<S> {
    pub fn new(scaffold: S) -> Self {
        Self { scaffold }
    }

    /// Returns the affected service names, duplicates removed.
    pub fn install(&self, location: &Path, services: &[String]) -> Result<Vec<String>> {
        let config = require_config(location)?;
        let services = dedup_services(services.iter().cloned());

        self.scaffold.add(&config.path, &services)?;
        info!(
            path = %config.path.display(),
            services = %services.join(", "),
            "services installed"
        );
        Ok(services)
    }

    /// Returns the affected service names, duplicates removed.
    pub fn uninstall(&self, location: &Path, services: &[String]) -> Result<Vec<String>> {
        let config = require_config(location)?;
        let services = dedup_services(services.iter().cloned());

        self.scaffold.remove(&config.path, &services)?;
        info!(
            path = %config.path.display(),
            services = %services.join(", "),
            "services removed"
        );
        Ok(services)
    }
}
