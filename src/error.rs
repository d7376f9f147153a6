//! Error types for branch-context operations.
//!
//! Every variant renders a message fit to print after `error: ` on the
//! command line. None of them are retried; the CLI maps all of them to
//! exit code 1.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the library layer.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The working directory is not inside a Git repository.
    #[error("not a git repository: {}", .path.display())]
    NotAGitRepository { path: PathBuf },

    /// The repository has no `.omnicontext/` directory yet.
    #[error("not initialized: {}. Run 'omnicontext init' first", .root.display())]
    NotInitialized { root: PathBuf },

    /// The persisted config document could not be read or is malformed.
    #[error("failed to parse config {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    /// An I/O failure while creating or populating a branch directory.
    #[error("failed to create context for branch '{branch}' at {}: {source}", .path.display())]
    ContextCreation {
        branch: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A regular file or directory occupies the working symlink path.
    #[error("{} exists and is not a symlink; move it away and sync again", .path.display())]
    SymlinkConflict { path: PathBuf },

    /// A post-checkout hook not managed by omnicontext is already present.
    #[error("post-checkout hook already exists (not managed by omnicontext): {}", .path.display())]
    HookConflict { path: PathBuf },

    /// Detached HEAD or an otherwise unresolvable branch name.
    #[error("could not determine current branch (detached HEAD?)")]
    BranchUndetermined,

    /// A filesystem failure outside template copying.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A version-control write (e.g. `git config --global`) failed.
    #[error("git {operation} failed: {message}")]
    Vcs { operation: String, message: String },
}

impl ContextError {
    /// Build an `Io` error for the given action and path.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Build a `ContextCreation` error for a branch and failing path.
    pub fn creation(branch: &str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ContextCreation {
            branch: branch.to_string(),
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the library layer.
pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_path() {
        let err = ContextError::ConfigParse {
            path: PathBuf::from("/repo/.omnicontext/config.json"),
            reason: "expected value".to_string(),
        };
        assert!(err.to_string().contains("/repo/.omnicontext/config.json"));

        let err = ContextError::SymlinkConflict {
            path: PathBuf::from("/repo/_context"),
        };
        assert!(err.to_string().contains("/repo/_context"));
    }

    #[test]
    fn test_creation_error_names_branch() {
        let err = ContextError::creation(
            "feature/x",
            "/repo/.omnicontext/branches/feature-x",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("feature/x"));
        assert!(msg.contains("feature-x"));
    }
}
