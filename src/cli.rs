use clap::{ArgAction, Parser, Subcommand};

/// git-pgl command-line interface
#[derive(Parser, Debug, Clone)]
#[command(name = "git-pgl", version, about = "Helpers for git subprograms", long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv). `RUST_LOG` overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Verify the environment subprograms need (the default)
    Check,

    /// Print the configuration a subprogram would receive
    Config {
        /// Print only this key's value; exit non-zero if unset
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
}
