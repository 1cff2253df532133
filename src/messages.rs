//! Output helpers shared by git subprograms.

use std::fmt::Display;

/// Print `msg` to stderr.
pub fn warn(msg: impl Display) {
    eprintln!("{msg}");
}

/// Print `msg` to stderr and exit with status 1.
pub fn die(msg: impl Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1)
}
