use super::CommandContext;
use crate::error::CliResult;
use bnode_config::{CreateOptions, FsScaffold, NetworkType, Scaffold};
use std::path::{Path, PathBuf};

/// `bnode create <directory> [--datadir <dir>] [--testnet]`
pub fn run(
    ctx: &CommandContext,
    directory: &Path,
    datadir: Option<PathBuf>,
    testnet: bool,
) -> CliResult<()> {
    let network = if testnet {
        NetworkType::Testnet
    } else {
        NetworkType::Main
    };

    FsScaffold::new().create(&CreateOptions {
        cwd: ctx.cwd.clone(),
        dirname: directory.to_path_buf(),
        datadir,
        network,
    })?;

    println!(
        "Successfully created node in directory: {}",
        directory.display()
    );
    Ok(())
}
