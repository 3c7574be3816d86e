//! Command implementations for planloop.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod init;
mod plan;
mod shell;

use crate::cli::{Cli, Command};
use crate::context::AppContext;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// `init` runs before any config is loaded, so a broken `planloop.yaml`
/// can still be replaced with `init --force`.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init(args) => init::cmd_init(args),
        Command::Plan(args) => plan::cmd_plan(&AppContext::resolve(&cli.global)?, args),
        Command::Run(args) => plan::cmd_run(&AppContext::resolve(&cli.global)?, args),
        Command::Shell => shell::cmd_shell(&AppContext::resolve(&cli.global)?),
        Command::Config => cmd_config(&AppContext::resolve(&cli.global)?),
    }
}

/// Print the effective configuration.
fn cmd_config(ctx: &AppContext) -> Result<()> {
    print!("{}", ctx.config.to_yaml()?);
    if !ctx.config.generator.is_configured() {
        eprintln!();
        eprintln!("Note: no generator command is configured. Run `planloop init` and edit planloop.yaml.");
    }
    Ok(())
}
