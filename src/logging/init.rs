use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const fn base_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn build_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).context("invalid RUST_LOG / filter")
}

fn install(filter_layer: EnvFilter) {
    use tracing_subscriber::{fmt, prelude::*};

    // stdout belongs to the subprogram
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    // Allow re-init to be a no-op in tests
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}

/// Initialize tracing on stderr. RUST_LOG (if set) takes precedence.
/// Otherwise, -v/-vv map to "debug"/"trace".
///
/// # Errors
/// Returns an error if the filter expression is invalid; nothing is
/// installed in that case.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| base_filter(verbosity).to_string());
    install(build_filter(&filter)?);
    Ok(())
}

/// Initialize tracing with the verbosity-derived filter, ignoring RUST_LOG.
pub fn init_default_tracing(verbosity: u8) {
    if let Ok(filter) = build_filter(base_filter(verbosity)) {
        install(filter);
    }
}
