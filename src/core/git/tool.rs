use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{Context, Result};
use tracing::debug;

/// Captured result of a single tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub success: bool,
}

impl ToolOutput {
    /// First line of stdout with the line terminator removed.
    #[must_use]
    pub fn first_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .next()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
    }
}

/// Handle on the external git executable.
#[derive(Debug, Clone)]
pub struct GitTool {
    program: OsString,
    base_args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitTool {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            base_args: Vec::new(),
            cwd: None,
        }
    }

    /// Prepend `arg` to every invocation (e.g. `-c key=value`).
    #[must_use]
    pub fn base_arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.base_args.push(arg.as_ref().to_os_string());
        self
    }

    /// Run every invocation from `dir` instead of the inherited directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Run the tool with `args`, discarding its stderr.
    ///
    /// A non-zero exit is reported through [`ToolOutput::success`] rather
    /// than as an error.
    ///
    /// # Errors
    /// Returns an error if the tool cannot be spawned.
    pub fn run<I, S>(&self, args: I) -> Result<ToolOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().with_context(|| {
            format!(
                "failed to run {} {}",
                self.program.to_string_lossy(),
                display_args(&args)
            )
        })?;

        debug!(
            program = %self.program.to_string_lossy(),
            args = %display_args(&args),
            status = %output.status,
            "git invocation finished"
        );

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            success: output.status.success(),
        })
    }
}

fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
