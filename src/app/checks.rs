use anyhow::{Result, bail};

use crate::messages::die;

/// Verify the capabilities a subprogram relies on are available.
///
/// Argument parsing is provided by the optional `cli` feature; a build
/// without it cannot parse subprogram arguments.
///
/// # Errors
/// Returns an error naming the first missing capability.
pub fn check_environment() -> Result<()> {
    if !cfg!(feature = "cli") {
        bail!("git-pgl must be built with the \"cli\" feature for argument parsing");
    }
    Ok(())
}

/// Run [`check_environment`] and exit with status 1 if it fails.
pub fn do_checks() {
    if let Err(e) = check_environment() {
        die(e);
    }
}
