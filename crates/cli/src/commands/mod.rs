//! Subcommand implementations.
//!
//! Each command prints its user-facing output to stdout and returns a
//! [`CliResult`]; reporting failures is left to the router.

pub mod call;
pub mod create;
pub mod fix;
pub mod services;
pub mod start;

use crate::error::CliResult;
use crate::CliOptions;
use bnode_config::{resolve, ConfigInfo, DefaultConfigOptions};
use std::path::{Path, PathBuf};

/// Invocation context shared by all commands
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Directory the command was run from
    pub cwd: PathBuf,
    pub options: CliOptions,
}

impl CommandContext {
    pub fn new(cwd: PathBuf, options: CliOptions) -> Self {
        Self { cwd, options }
    }

    /// Configuration found from `explicit` or the working directory, else defaults.
    pub fn resolve_config(&self, explicit: Option<&Path>) -> CliResult<ConfigInfo> {
        let defaults = DefaultConfigOptions {
            additional_services: self.options.additional_services.clone(),
        };
        Ok(resolve(explicit, &self.cwd, &defaults)?)
    }
}
