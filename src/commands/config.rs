use std::io::{self, Write};

use anyhow::{Result, bail};

use super::Command;
use crate::app::context::AppContext;

pub struct ConfigCommand<'a> {
    pub key: Option<&'a str>,
}

impl Command for ConfigCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let mut out = io::stdout().lock();
        match self.key {
            Some(key) => match ctx.cfg.get(key) {
                Some(value) => writeln!(out, "{value}")?,
                None => bail!("{key} is not set"),
            },
            None => {
                for (key, value) in ctx.cfg.iter() {
                    writeln!(out, "{key}={value}")?;
                }
            }
        }
        Ok(())
    }
}
