//! Repository queries.
//!
//! `GitCommand` implements `VcsProvider` here, and the two resolution
//! helpers turn the provider's optional answers into typed errors.

use super::VcsProvider;
use crate::error::{ContextError, Result};
use crate::git::GitCommand;
use std::path::{Path, PathBuf};

const HOOKS_PATH_KEY: &str = "core.hooksPath";
const USER_NAME_KEY: &str = "user.name";

impl VcsProvider for GitCommand {
    fn repository_root(&self, cwd: &Path) -> Option<PathBuf> {
        self.show_toplevel(cwd)
            .map_err(|e| log::warn!("{e:#}"))
            .ok()
            .flatten()
    }

    fn current_branch(&self, root: &Path) -> Option<String> {
        self.symbolic_ref_short_head(root)
            .map_err(|e| log::warn!("{e:#}"))
            .ok()
            .flatten()
    }

    fn user_name(&self, root: &Path) -> Option<String> {
        self.config_get(root, USER_NAME_KEY).ok().flatten()
    }

    fn global_hooks_path(&self) -> Option<String> {
        self.config_get_global(HOOKS_PATH_KEY).ok().flatten()
    }

    fn set_global_hooks_path(&self, path: &Path) -> Result<()> {
        self.config_set_global(HOOKS_PATH_KEY, &path.to_string_lossy())
            .map_err(|e| ContextError::Vcs {
                operation: format!("config --global {HOOKS_PATH_KEY}"),
                message: format!("{e:#}"),
            })
    }

    fn unset_global_hooks_path(&self) -> Result<()> {
        self.config_unset_global(HOOKS_PATH_KEY)
            .map_err(|e| ContextError::Vcs {
                operation: format!("config --global --unset {HOOKS_PATH_KEY}"),
                message: format!("{e:#}"),
            })
    }
}

/// Repository root for `cwd`, or `NotAGitRepository`.
pub fn resolve_root(vcs: &dyn VcsProvider, cwd: &Path) -> Result<PathBuf> {
    vcs.repository_root(cwd)
        .ok_or_else(|| ContextError::NotAGitRepository {
            path: cwd.to_path_buf(),
        })
}

/// Current branch at `root`, or `BranchUndetermined`.
///
/// `HEAD` is what `git rev-parse --abbrev-ref HEAD` prints on a detached
/// head, so it is treated the same as no answer.
pub fn resolve_branch(vcs: &dyn VcsProvider, root: &Path) -> Result<String> {
    match vcs.current_branch(root) {
        Some(branch) if is_branch_name(&branch) => Ok(branch),
        _ => Err(ContextError::BranchUndetermined),
    }
}

/// Whether `name` names a branch rather than a detached head.
pub fn is_branch_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name != "HEAD"
}
