use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::{ident::extract_identity, tool::GitTool};
use crate::config::{Config, GIT_DIR, GIT_LIBEXEC, GIT_TOPLEVEL, PGL_OK, Value};

/// Environment variables with this prefix are imported with `PY_` removed.
pub const ENV_PREFIX: &str = "PY_GIT_";
/// Presence of this environment variable skips the environment checks.
pub const SKIP_CHECKS_VAR: &str = "PGL_OK";

const IDENT_KEYS: [(&str, &str); 2] = [
    ("GIT_COMMITTER_IDENT", "GIT_COMMITTER"),
    ("GIT_AUTHOR_IDENT", "GIT_AUTHOR"),
];

/// Builds a [`Config`] from git and the process environment.
#[derive(Debug, Clone, Default)]
pub struct Bootstrapper {
    tool: GitTool,
    env: Option<Vec<(String, String)>>,
}

impl Bootstrapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `tool` for every git invocation.
    #[must_use]
    pub fn tool(mut self, tool: GitTool) -> Self {
        self.tool = tool;
        self
    }

    /// Overlay these variables instead of the process environment.
    #[must_use]
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Gather git variables, repository paths and environment overrides.
    ///
    /// # Errors
    /// Returns an error if git cannot be spawned or the working directory
    /// needed to qualify a relative `GIT_DIR` is unavailable.
    pub fn bootstrap(&self) -> Result<Config> {
        let mut cfg = Config::new();

        self.load_git_vars(&mut cfg)?;
        self.discover_paths(&mut cfg)?;

        match &self.env {
            Some(vars) => apply_env_overlay(&mut cfg, vars.iter().map(|(k, v)| (k, v))),
            None => apply_env_overlay(&mut cfg, process_env()),
        }

        qualify_git_dir(&mut cfg, || self.working_dir())?;

        debug!(keys = cfg.len(), "configuration bootstrapped");
        Ok(cfg)
    }

    fn load_git_vars(&self, cfg: &mut Config) -> Result<()> {
        let out = self.tool.run(["var", "-l"])?;
        if !out.success {
            warn!("`git var -l` exited unsuccessfully; using whatever it printed");
        }
        parse_var_listing(cfg, &out.stdout);
        Ok(())
    }

    fn discover_paths(&self, cfg: &mut Config) -> Result<()> {
        let exec = self.tool.run(["--exec-path"])?;
        if !exec.success {
            warn!("`git --exec-path` exited unsuccessfully");
        }
        match exec.first_line() {
            Some(path) => cfg.insert(GIT_LIBEXEC, path),
            None => warn!("`git --exec-path` printed nothing; {GIT_LIBEXEC} left unset"),
        }

        for (key, flag) in [(GIT_DIR, "--git-dir"), (GIT_TOPLEVEL, "--show-toplevel")] {
            let out = self.tool.run(["rev-parse", flag])?;
            match out.first_line() {
                Some(line) if out.success => cfg.insert(key, line),
                _ => debug!(flag, "not inside a work tree; {key} left unset"),
            }
        }
        Ok(())
    }

    fn working_dir(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Ok(match self.tool.cwd() {
            Some(dir) => cwd.join(dir),
            None => cwd,
        })
    }
}

/// Load `KEY=value` lines as printed by `git var -l`.
///
/// Identity entries are split into name/email keys; other values are
/// coerced with [`Value::coerce`].
pub fn parse_var_listing(cfg: &mut Config, listing: &str) {
    for line in listing.lines() {
        let line = line.trim_end_matches('\r');
        let Some((key, value)) = line.split_once('=') else {
            if !line.is_empty() {
                debug!(line, "skipping git var line without '='");
            }
            continue;
        };

        match IDENT_KEYS.iter().find(|(ident, _)| *ident == key) {
            Some((_, role)) => extract_identity(cfg, value, role),
            None => cfg.insert(key, Value::coerce(value)),
        }
    }
}

/// Import `PY_GIT_*` variables and the `PGL_OK` flag.
pub fn apply_env_overlay<I, K, V>(cfg: &mut Config, vars: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (key, value) in vars {
        let key = key.as_ref();
        if key.starts_with(ENV_PREFIX) {
            // PY_GIT_FOO -> GIT_FOO
            cfg.insert(&key[3..], value.as_ref());
        } else if key == SKIP_CHECKS_VAR {
            cfg.insert(PGL_OK, true);
        }
    }
}

/// Rewrite a relative `GIT_DIR` as an absolute path, rooted at
/// `GIT_TOPLEVEL` when known. `working_dir` is only consulted when that
/// still leaves the path relative.
fn qualify_git_dir<W>(cfg: &mut Config, working_dir: W) -> Result<()>
where
    W: Fn() -> Result<PathBuf>,
{
    let Some(git_dir) = cfg.git_dir().filter(|p| !p.is_absolute()) else {
        return Ok(());
    };
    let git_dir = git_dir.to_path_buf();

    let joined = match cfg.toplevel() {
        Some(top) => top.join(&git_dir),
        None => git_dir.clone(),
    };
    let qualified = if joined.is_absolute() {
        normalize(&joined)
    } else {
        absolutize(&joined, &working_dir()?)
    };
    debug!(from = %git_dir.display(), to = %qualified.display(), "qualified GIT_DIR");
    cfg.set_git_dir(qualified);
    Ok(())
}

fn process_env() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

/// Make `path` absolute against `base` and fold `.`/`..` lexically.
#[must_use]
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
