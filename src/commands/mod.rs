use anyhow::Result;

use crate::{
    app::context::AppContext,
    cli::{Cli, Commands},
};

pub mod check;
pub mod config;

/// Unified interface implemented by each subcommand handler.
pub trait Command {
    /// Execute the subcommand.
    ///
    /// # Errors
    /// Returns an error if the command fails.
    fn run(&self, ctx: &AppContext) -> Result<()>;
}

/// Central dispatcher: routes parsed CLI to subcommand handlers.
///
/// # Errors
/// Returns an error if bootstrapping or the invoked subcommand fails.
pub fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        None | Some(Commands::Check) => check::self_check(),
        Some(Commands::Config { key }) => {
            let ctx = AppContext::bootstrap(cli.verbose)?;
            let cmd = config::ConfigCommand {
                key: key.as_deref(),
            };
            cmd.run(&ctx)
        }
    }
}
