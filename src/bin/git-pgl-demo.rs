//! Minimal git subprogram built on git-pgl.
//!
//! Installed as `git-pgl-demo`, it can be run as `git pgl-demo`.

use anyhow::{Result, bail};
use clap::Parser;
use git_pgl::{Config, InvocationMode, entry_point, warn};

/// Example git subprogram
#[derive(Parser, Debug)]
#[command(name = "git-pgl-demo", version, about = "Example git subprogram built on git-pgl", long_about = None)]
struct Args {
    /// Print this configuration key's value
    #[arg(long, value_name = "KEY")]
    show: Option<String>,

    /// Fail with this message
    #[arg(long, value_name = "MESSAGE")]
    fail: Option<String>,

    /// Exit status to return
    #[arg(long, default_value_t = 0)]
    status: i32,
}

fn demo(cfg: &Config) -> Result<i32> {
    let args = Args::parse();

    if let Some(key) = &args.show {
        match cfg.get(key) {
            Some(value) => println!("{value}"),
            None => warn(format!("{key} is not set")),
        }
    }
    if let Some(message) = args.fail {
        bail!(message);
    }
    Ok(args.status)
}

fn main() {
    entry_point(InvocationMode::Direct, demo);
}
