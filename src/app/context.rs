use anyhow::Result;

use crate::{config::Config, core::git::Bootstrapper};

#[derive(Debug, Clone)]
pub struct AppContext {
    pub cfg: Config,
    pub verbosity: u8,
}

impl AppContext {
    pub const fn new(cfg: Config, verbosity: u8) -> Self {
        Self { cfg, verbosity }
    }

    /// Convenience constructor bootstrapping config from the current directory.
    ///
    /// # Errors
    /// Returns an error if git cannot be run.
    pub fn bootstrap(verbosity: u8) -> Result<Self> {
        let cfg = Bootstrapper::new().bootstrap()?;
        Ok(Self::new(cfg, verbosity))
    }
}
