//! Branch sync: ensure the context directory, repoint the symlink, run the
//! on-switch command.

use super::context::{self, CreateResult};
use super::symlink::{self, SymlinkResult};
use super::{ProgressSink, VcsProvider};
use crate::config::env;
use crate::error::{ContextError, Result};
use crate::paths;
use crate::settings::Config;
use crate::template::{self, TemplateVars};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit status of the on-switch command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackOutcome {
    /// Command after `{branch}` substitution.
    pub command: String,
    /// Exit code; `None` when the shell could not be spawned or the
    /// command was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CallbackOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Everything a sync did, for presentation.
#[derive(Debug, Clone)]
pub struct SyncResult {
    pub branch: String,
    pub branch_dir: PathBuf,
    pub create_result: CreateResult,
    pub symlink_result: SymlinkResult,
    pub symlink_path: PathBuf,
    /// Another branch name already recorded for the same directory.
    pub collision: Option<String>,
    /// Set when `on_switch` is configured.
    pub callback: Option<CallbackOutcome>,
}

impl SyncResult {
    /// Turn a blocked symlink into `SymlinkConflict`.
    pub fn into_checked(self) -> Result<Self> {
        match self.symlink_result {
            SymlinkResult::NotASymlink => Err(ContextError::SymlinkConflict {
                path: self.symlink_path,
            }),
            _ => Ok(self),
        }
    }
}

/// Sync the context for `branch` in the repository at `root`.
///
/// Steps run in order and are not rolled back: a failure while repointing
/// the symlink leaves the freshly created branch directory in place, which
/// the next sync picks up. A blocked symlink is reported in the result, not
/// as an error, and the on-switch command still runs.
pub fn sync_branch(
    root: &Path,
    branch: &str,
    vcs: &dyn VcsProvider,
    progress: &mut dyn ProgressSink,
) -> Result<SyncResult> {
    let config = Config::load(root)?;
    let vars = TemplateVars::new(branch).with_author(vcs.user_name(root));

    let collision = context::detect_collision(root, branch);
    if let Some(other) = &collision {
        progress.on_warning(&format!(
            "Branch '{branch}' shares its context directory with '{other}'"
        ));
    }

    let create_result = context::create_context(root, branch, &config, &vars, progress)?;
    let symlink_result = symlink::update_symlink(root, branch, &config, &vars, progress)?;

    let callback = config
        .on_switch
        .as_deref()
        .map(|command| run_on_switch(root, branch, command, progress));

    Ok(SyncResult {
        branch: branch.to_string(),
        branch_dir: paths::branch_dir(root, branch),
        create_result,
        symlink_result,
        symlink_path: config.symlink_path(root),
        collision,
        callback,
    })
}

/// Run the on-switch command through `sh -c` from the repository root.
///
/// The branch is substituted for `{branch}` and also exported as
/// `OMNICONTEXT_BRANCH`. Stdio is inherited. Failure is reported in the
/// outcome, never as an error.
pub fn run_on_switch(
    root: &Path,
    branch: &str,
    command: &str,
    progress: &mut dyn ProgressSink,
) -> CallbackOutcome {
    let command = template::substitute_branch(command, branch);
    progress.on_step(&format!("Running on_switch: {command}"));

    let status = Command::new("sh")
        .args(["-c", &command])
        .current_dir(root)
        .env(env::BRANCH, branch)
        .status();

    let exit_code = match status {
        Ok(status) => status.code(),
        Err(e) => {
            log::warn!("failed to spawn on_switch command '{command}': {e}");
            None
        }
    };
    log::debug!("on_switch exited with {exit_code:?}");

    CallbackOutcome { command, exit_code }
}

/// Sanitized names of all branch contexts.
///
/// Hidden entries and plain files are skipped. A missing branches directory
/// yields an empty set.
pub fn list_branches(root: &Path) -> BTreeSet<String> {
    let Ok(entries) = fs::read_dir(paths::branches_dir(root)) else {
        return BTreeSet::new();
    };

    entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect()
}

/// Number of non-hidden entries in a branch context.
pub fn count_entries(branch_dir: &Path) -> usize {
    fs::read_dir(branch_dir)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
                .count()
        })
        .unwrap_or(0)
}
