use super::CommandContext;
use crate::error::CliResult;
use bnode_config::{FsScaffold, ServiceInstaller};

/// `bnode install <services...>`
pub fn install(ctx: &CommandContext, services: &[String]) -> CliResult<()> {
    let added = ServiceInstaller::new(FsScaffold::new()).install(&ctx.cwd, services)?;
    println!("Successfully added service(s): {}", added.join(", "));
    Ok(())
}

/// `bnode uninstall <services...>`
pub fn uninstall(ctx: &CommandContext, services: &[String]) -> CliResult<()> {
    let removed = ServiceInstaller::new(FsScaffold::new()).uninstall(&ctx.cwd, services)?;
    println!("Successfully removed service(s): {}", removed.join(", "));
    Ok(())
}
