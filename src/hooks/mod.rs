//! Post-checkout hook installation.
//!
//! The hook file is in one of three states:
//!
//! | State | Meaning |
//! |-------|---------|
//! | `Absent` | no `post-checkout` file |
//! | `Managed` | file contains the `# omnicontext-managed` marker |
//! | `Foreign` | file exists without the marker |
//!
//! Only `Absent` is ever written to and only `Managed` is ever deleted. A
//! foreign hook is never modified; the caller reports it and the user
//! resolves it by hand.
//!
//! The repository hook lives at `<root>/.git/hooks/post-checkout`. Linked
//! worktrees (where `.git` is a file) are not handled.

mod shim;

pub use shim::{default_callback, hook_content, is_managed};

use crate::config::hook;
use crate::core::VcsProvider;
use crate::error::{ContextError, Result};
use crate::paths;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Absent,
    Managed,
    Foreign,
}

impl fmt::Display for HookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookState::Absent => write!(f, "not installed"),
            HookState::Managed => write!(f, "installed"),
            HookState::Foreign => write!(f, "foreign hook present"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallResult {
    Installed,
    AlreadyInstalled,
    /// A foreign hook occupies the slot; nothing was written.
    HookExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallResult {
    Uninstalled,
    NotInstalled,
    /// The hook is not ours; nothing was removed.
    NotManaged,
}

/// State of the hook file at `hook_path`.
///
/// An unreadable file counts as foreign so it is never overwritten.
pub fn hook_state(hook_path: &Path) -> HookState {
    match fs::read(hook_path) {
        Ok(bytes) if is_managed(&String::from_utf8_lossy(&bytes)) => HookState::Managed,
        Ok(_) => HookState::Foreign,
        Err(e) if e.kind() == io::ErrorKind::NotFound => HookState::Absent,
        Err(e) => {
            log::warn!("cannot read {}: {e}", hook_path.display());
            HookState::Foreign
        }
    }
}

/// Whether the repository at `root` has the managed hook.
pub fn is_installed(root: &Path) -> bool {
    hook_state(&paths::hook_path(root)) == HookState::Managed
}

/// Install the managed hook into the repository at `root`.
///
/// `callback` defaults to [`default_callback`].
pub fn install(root: &Path, callback: Option<&str>) -> Result<InstallResult> {
    install_into(&paths::hooks_dir(root), callback)
}

/// Install the managed hook into `hooks_dir` and point the global
/// `core.hooksPath` at it.
///
/// The global setting is left alone when a foreign hook blocks the install.
pub fn install_global(
    hooks_dir: &Path,
    callback: Option<&str>,
    vcs: &dyn VcsProvider,
) -> Result<InstallResult> {
    let result = install_into(hooks_dir, callback)?;
    if result != InstallResult::HookExists {
        vcs.set_global_hooks_path(hooks_dir)?;
    }
    Ok(result)
}

/// Remove the managed hook from the repository at `root`.
pub fn uninstall(root: &Path) -> Result<UninstallResult> {
    let hook_path = paths::hook_path(root);
    match hook_state(&hook_path) {
        HookState::Absent => Ok(UninstallResult::NotInstalled),
        HookState::Foreign => Ok(UninstallResult::NotManaged),
        HookState::Managed => {
            fs::remove_file(&hook_path).map_err(|e| ContextError::io("remove", &hook_path, e))?;
            log::debug!("removed {}", hook_path.display());
            Ok(UninstallResult::Uninstalled)
        }
    }
}

fn install_into(hooks_dir: &Path, callback: Option<&str>) -> Result<InstallResult> {
    let hook_path = hooks_dir.join(hook::NAME);
    match hook_state(&hook_path) {
        HookState::Managed => return Ok(InstallResult::AlreadyInstalled),
        HookState::Foreign => return Ok(InstallResult::HookExists),
        HookState::Absent => {}
    }

    fs::create_dir_all(hooks_dir)
        .map_err(|e| ContextError::io("create directory", hooks_dir, e))?;

    let callback = callback.map_or_else(default_callback, str::to_string);
    fs::write(&hook_path, hook_content(&callback))
        .map_err(|e| ContextError::io("write", &hook_path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&hook_path, fs::Permissions::from_mode(0o755))
            .map_err(|e| ContextError::io("set permissions on", &hook_path, e))?;
    }

    log::debug!("wrote {} (callback: {callback})", hook_path.display());
    Ok(InstallResult::Installed)
}
