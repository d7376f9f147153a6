use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output};

mod config;
mod repo;

/// Thin wrapper around the `git` binary.
///
/// Every call takes the directory to run in explicitly; nothing depends on
/// the process working directory. Failures are traced at debug level and
/// otherwise left to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCommand;

impl GitCommand {
    pub fn new() -> Self {
        Self
    }

    /// Run `git <args>` in `dir` and capture its output.
    pub(crate) fn run_in(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        log::debug!("git {} (in {})", args.join(" "), dir.display());
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;
        self.trace_failure(&output);
        Ok(output)
    }

    /// Run `git <args>` outside any repository (global config operations).
    pub(crate) fn run(&self, args: &[&str]) -> Result<Output> {
        log::debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;
        self.trace_failure(&output);
        Ok(output)
    }

    fn trace_failure(&self, output: &Output) {
        if !output.status.success() {
            log::debug!(
                "git exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
    }
}

/// Trimmed stdout of a successful git invocation, `None` when git failed or
/// printed nothing.
pub(crate) fn stdout_if_success(output: &Output) -> Result<Option<String>> {
    if !output.status.success() {
        return Ok(None);
    }

    let value = String::from_utf8(output.stdout.clone())
        .context("Failed to parse git output")?
        .trim()
        .to_string();

    Ok(if value.is_empty() { None } else { Some(value) })
}
