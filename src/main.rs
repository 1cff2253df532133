use anyhow::Result;
use clap::Parser;
use git_pgl::{cli::Cli, logging::init::init_tracing, run};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    run(&cli)
}
