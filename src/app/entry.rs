use std::{
    backtrace::{Backtrace, BacktraceStatus},
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::warn;

use super::checks::do_checks;
use crate::{
    config::Config,
    core::git::Bootstrapper,
    logging::init::{init_default_tracing, init_tracing},
    messages::{die, warn as warn_user},
};

/// File written to the current directory when a subprogram's entry
/// function fails.
pub const TRACE_FILE: &str = "pygit.tb";

/// How the process reached the code that calls [`entry_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Linked into another program; the entry function must not run.
    Library,
    /// Started as the git subprogram itself.
    Direct,
}

/// Bootstraps configuration and runs a subprogram's entry function.
#[derive(Debug, Clone)]
pub struct Launcher {
    bootstrapper: Bootstrapper,
    trace_path: PathBuf,
}

impl Default for Launcher {
    fn default() -> Self {
        Self {
            bootstrapper: Bootstrapper::default(),
            trace_path: PathBuf::from(TRACE_FILE),
        }
    }
}

impl Launcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bootstrapper(mut self, bootstrapper: Bootstrapper) -> Self {
        self.bootstrapper = bootstrapper;
        self
    }

    /// Where to write the error report; relative paths resolve against the
    /// current directory at the time of the failure.
    #[must_use]
    pub fn trace_path(mut self, path: impl AsRef<Path>) -> Self {
        self.trace_path = path.as_ref().to_path_buf();
        self
    }

    /// Bootstrap, check the environment unless `PGL_OK` is set, then call
    /// `main` and return the exit status for the process.
    ///
    /// An error from `main` is printed to stdout, its full report is written
    /// to the trace file, and the status becomes 1.
    ///
    /// # Errors
    /// Returns an error only if bootstrapping fails.
    pub fn run<F>(&self, main: F) -> Result<i32>
    where
        F: FnOnce(&Config) -> Result<i32>,
    {
        let cfg = self
            .bootstrapper
            .bootstrap()
            .context("failed to gather git configuration")?;

        if !cfg.skip_checks() {
            do_checks();
        }

        Ok(match main(&cfg) {
            Ok(code) => code,
            Err(err) => {
                let frames = match err.backtrace().status() {
                    BacktraceStatus::Captured => None,
                    _ => Some(Backtrace::force_capture()),
                };
                println!("{err}");
                if let Err(e) = write_trace(&self.trace_path, &err, frames.as_ref()) {
                    warn!(error = %format!("{e:#}"), "could not save error report");
                }
                1
            }
        })
    }
}

/// Mark `main` as a git subprogram's entry function.
///
/// In [`InvocationMode::Library`] this returns `main` untouched. In
/// [`InvocationMode::Direct`] it runs `main` through a default [`Launcher`]
/// and exits the process with the resulting status.
pub fn entry_point<F>(mode: InvocationMode, main: F) -> F
where
    F: FnOnce(&Config) -> Result<i32>,
{
    match mode {
        InvocationMode::Library => main,
        InvocationMode::Direct => {
            if let Err(e) = init_tracing(0) {
                warn_user(format!("{e:#}; using the default log filter"));
                init_default_tracing(0);
            }
            let code = Launcher::new()
                .run(main)
                .unwrap_or_else(|e| die(format!("{e:#}")));
            std::process::exit(code)
        }
    }
}

/// Write `err` with its cause chain, then `frames` when the error itself
/// carries no captured backtrace.
fn write_trace(path: &Path, err: &anyhow::Error, frames: Option<&Backtrace>) -> Result<()> {
    use time::{OffsetDateTime, format_description::well_known::Rfc3339};

    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let stamp = now.format(&Rfc3339).unwrap_or_else(|_| now.to_string());

    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(file, "error report written {stamp}")?;
    writeln!(file, "{err:?}")?;
    if let Some(frames) = frames {
        writeln!(file, "\nstack backtrace:\n{frames}")?;
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use std::{cell::Cell, fs};

    use anyhow::anyhow;

    use super::*;
    use crate::core::git::GitTool;

    // `true` accepts any arguments, prints nothing and succeeds.
    fn quiet_launcher(trace: &Path) -> Launcher {
        Launcher::new()
            .bootstrapper(
                Bootstrapper::new()
                    .tool(GitTool::new("true"))
                    .env_vars([("PGL_OK", "1"), ("PY_GIT_CUSTOM", "value")]),
            )
            .trace_path(trace)
    }

    #[test]
    fn returned_status_becomes_exit_code() {
        let td = tempfile::tempdir().expect("tempdir");
        let trace = td.path().join(TRACE_FILE);
        let code = quiet_launcher(&trace).run(|_| Ok(7)).expect("run");
        assert_eq!(code, 7);
        assert!(!trace.exists());
    }

    #[test]
    fn entry_receives_bootstrapped_config() {
        let td = tempfile::tempdir().expect("tempdir");
        let code = quiet_launcher(&td.path().join(TRACE_FILE))
            .run(|cfg| {
                assert_eq!(cfg.get_str("GIT_CUSTOM"), Some("value"));
                assert!(cfg.skip_checks());
                Ok(0)
            })
            .expect("run");
        assert_eq!(code, 0);
    }

    #[test]
    fn error_exits_one_and_writes_trace() {
        let td = tempfile::tempdir().expect("tempdir");
        let trace = td.path().join(TRACE_FILE);
        let code = quiet_launcher(&trace)
            .run(|_| Err::<i32, _>(anyhow!("disk on fire")).context("could not frobnicate"))
            .expect("run");
        assert_eq!(code, 1);

        let report = fs::read_to_string(&trace).expect("trace file");
        assert!(report.starts_with("error report written"));
        assert!(report.contains("could not frobnicate"));
        assert!(report.contains("disk on fire"));
        // frames are recorded whether or not RUST_BACKTRACE is set
        assert!(report.contains("git_pgl::app::entry"));
    }

    #[test]
    fn library_mode_is_transparent() {
        let calls = Cell::new(0);
        let main = entry_point(InvocationMode::Library, |_cfg: &Config| {
            calls.set(calls.get() + 1);
            Ok(3)
        });
        assert_eq!(calls.get(), 0);

        assert_eq!(main(&Config::new()).expect("main"), 3);
        assert_eq!(calls.get(), 1);
    }
}
