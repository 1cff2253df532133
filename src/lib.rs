//! Helpers for writing git subprograms.
//!
//! A subprogram hands its entry function to [`entry_point`]. When started
//! directly, the configuration git exposes (`git var -l`, the exec path,
//! repository directories and `PY_GIT_*` overrides) is gathered into a
//! [`Config`] and passed to that function; its return value becomes the
//! exit status.
//!
//! ```no_run
//! use git_pgl::{InvocationMode, entry_point, warn};
//!
//! fn main() {
//!     entry_point(InvocationMode::Direct, |cfg| {
//!         match cfg.git_dir() {
//!             Some(dir) => println!("{}", dir.display()),
//!             None => warn("not inside a repository"),
//!         }
//!         Ok(0)
//!     });
//! }
//! ```

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;
pub mod config;
pub mod core;
pub mod logging;
pub mod messages;

pub use app::checks::{check_environment, do_checks};
pub use app::entry::{InvocationMode, Launcher, TRACE_FILE, entry_point};
#[cfg(feature = "cli")]
pub use clap;
pub use config::{Config, Value};
pub use crate::core::git::{Bootstrapper, GitTool};
pub use messages::{die, warn};

/// Entry point for the `git-pgl` binary's subcommands.
///
/// # Errors
/// Returns an error if the selected subcommand fails.
#[cfg(feature = "cli")]
pub fn run(cli: &cli::Cli) -> anyhow::Result<()> {
    commands::dispatch(cli)
}
