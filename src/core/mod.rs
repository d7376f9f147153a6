//! Core business logic abstractions.
//!
//! This module defines the traits that keep the branch-sync engine free of
//! any UI or environment coupling: progress goes through `ProgressSink`,
//! and every question about the repository goes through `VcsProvider`.
//! Commands provide real implementations; tests provide the no-op and
//! in-memory ones defined here.

pub mod context;
pub mod init;
mod progress;
mod repo;
pub mod symlink;
pub mod sync;

pub use progress::OutputSink;
pub use repo::{is_branch_name, resolve_branch, resolve_root};

use crate::error::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────
// Progress reporting
// ─────────────────────────────────────────────────────────────────────────

/// Trait for core operations to report progress without depending on `Output`.
///
/// Commands create an adapter (e.g., `OutputSink`) that bridges this trait
/// to the actual output implementation. Tests can use `NullSink` to suppress
/// all output.
pub trait ProgressSink {
    /// Report an intermediate step (shown in verbose mode).
    fn on_step(&mut self, msg: &str);

    /// Report a warning (always shown).
    fn on_warning(&mut self, msg: &str);

    /// Report a debug message (shown in verbose mode).
    fn on_debug(&mut self, msg: &str);
}

/// A no-op sink that discards all progress messages.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_step(&mut self, _msg: &str) {}
    fn on_warning(&mut self, _msg: &str) {}
    fn on_debug(&mut self, _msg: &str) {}
}

// ─────────────────────────────────────────────────────────────────────────
// Version control
// ─────────────────────────────────────────────────────────────────────────

/// The questions omnicontext asks of the version-control system.
///
/// `GitCommand` answers them by running `git`; `StaticVcs` answers them from
/// memory so the engine can be tested without a real repository.
pub trait VcsProvider {
    /// Repository root for a working directory, `None` outside a repository.
    fn repository_root(&self, cwd: &Path) -> Option<PathBuf>;

    /// Checked-out branch name, `None` on detached HEAD.
    fn current_branch(&self, root: &Path) -> Option<String>;

    /// Configured author name, used for template rendering.
    fn user_name(&self, root: &Path) -> Option<String>;

    /// Global `core.hooksPath`, if set.
    fn global_hooks_path(&self) -> Option<String>;

    /// Point the global `core.hooksPath` at `path`.
    fn set_global_hooks_path(&self, path: &Path) -> Result<()>;

    /// Remove the global `core.hooksPath` setting.
    fn unset_global_hooks_path(&self) -> Result<()>;
}

/// In-memory `VcsProvider` with fixed answers.
#[derive(Debug, Default)]
pub struct StaticVcs {
    pub root: Option<PathBuf>,
    pub branch: Option<String>,
    pub user_name: Option<String>,
    pub hooks_path: RefCell<Option<String>>,
}

impl StaticVcs {
    /// A repository at `root` with `branch` checked out.
    pub fn new(root: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            root: Some(root.into()),
            branch: Some(branch.into()),
            ..Self::default()
        }
    }

    /// A repository at `root` on a detached HEAD.
    pub fn detached(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }
}

impl VcsProvider for StaticVcs {
    fn repository_root(&self, _cwd: &Path) -> Option<PathBuf> {
        self.root.clone()
    }

    fn current_branch(&self, _root: &Path) -> Option<String> {
        self.branch.clone()
    }

    fn user_name(&self, _root: &Path) -> Option<String> {
        self.user_name.clone()
    }

    fn global_hooks_path(&self) -> Option<String> {
        self.hooks_path.borrow().clone()
    }

    fn set_global_hooks_path(&self, path: &Path) -> Result<()> {
        *self.hooks_path.borrow_mut() = Some(path.display().to_string());
        Ok(())
    }

    fn unset_global_hooks_path(&self) -> Result<()> {
        *self.hooks_path.borrow_mut() = None;
        Ok(())
    }
}
