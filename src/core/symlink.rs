//! The working symlink that points at the current branch's context.

use super::context;
use super::ProgressSink;
use crate::error::{ContextError, Result};
use crate::paths;
use crate::settings::Config;
use crate::template::TemplateVars;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique temp link names within a process
static SWAP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Outcome of `update_symlink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymlinkResult {
    /// The link was created or repointed.
    Updated,
    /// The link already pointed at the branch directory.
    Unchanged,
    /// Something other than a symlink occupies the link path. Left untouched.
    NotASymlink,
}

impl fmt::Display for SymlinkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymlinkResult::Updated => write!(f, "updated"),
            SymlinkResult::Unchanged => write!(f, "unchanged"),
            SymlinkResult::NotASymlink => write!(f, "blocked (not a symlink)"),
        }
    }
}

/// Target the link at `link_path` should hold to reach `branch_dir`.
///
/// Relative to the link's parent directory, so a top-level link gets a
/// root-relative target and the repository stays relocatable.
pub fn link_target(link_path: &Path, branch_dir: &Path) -> PathBuf {
    let parent = link_path.parent().unwrap_or(Path::new(""));
    pathdiff::diff_paths(branch_dir, parent).unwrap_or_else(|| branch_dir.to_path_buf())
}

/// Point the configured symlink at `branch`'s context directory.
///
/// Creates the branch directory first when it is missing. A link that
/// already holds the right target is not touched.
pub fn update_symlink(
    root: &Path,
    branch: &str,
    config: &Config,
    vars: &TemplateVars,
    progress: &mut dyn ProgressSink,
) -> Result<SymlinkResult> {
    let branch_dir = paths::branch_dir(root, branch);
    if !branch_dir.exists() {
        context::create_context(root, branch, config, vars, progress)?;
    }

    let link_path = config.symlink_path(root);
    let target = link_target(&link_path, &branch_dir);

    match link_path.symlink_metadata() {
        Ok(meta) if meta.file_type().is_symlink() => {
            let current = read_symlink_target(&link_path)
                .map_err(|e| ContextError::io("read symlink", &link_path, e))?;
            if current.as_deref() == Some(target.as_path()) {
                progress.on_debug(&format!(
                    "{} already points to {}",
                    link_path.display(),
                    target.display()
                ));
                return Ok(SymlinkResult::Unchanged);
            }
        }
        Ok(_) => {
            progress.on_debug(&format!(
                "{} exists and is not a symlink",
                link_path.display()
            ));
            return Ok(SymlinkResult::NotASymlink);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(parent) = link_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ContextError::io("create directory", parent, e))?;
            }
        }
        Err(e) => return Err(ContextError::io("inspect", &link_path, e)),
    }

    atomic_symlink_swap(&link_path, &target)
        .map_err(|e| ContextError::io("replace symlink", &link_path, e))?;
    progress.on_step(&format!(
        "Linked {} -> {}",
        link_path.display(),
        target.display()
    ));

    Ok(SymlinkResult::Updated)
}

/// Atomically point `link_path` at `new_target`.
///
/// Creates a temp symlink next to the link, then renames it over the link.
/// Readers see either the old or the new target, never a missing link.
pub fn atomic_symlink_swap(link_path: &Path, new_target: &Path) -> io::Result<()> {
    loop {
        // {link_path}.tmp.{pid}.{counter}; retry if a crashed run left one behind
        let counter = SWAP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let unique_id = format!("{}.{}", std::process::id(), counter);
        let file_name = link_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = link_path.with_file_name(format!(".{file_name}.tmp.{unique_id}"));

        match create_dir_symlink(new_target, &temp_path) {
            Ok(()) => {
                if let Err(e) = replace_link(&temp_path, link_path) {
                    let _ = std::fs::remove_file(&temp_path);
                    return Err(e);
                }
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Read the target of a symlink, returning None if it doesn't exist.
pub fn read_symlink_target(link_path: &Path) -> io::Result<Option<PathBuf>> {
    match std::fs::read_link(link_path) {
        Ok(target) => Ok(Some(target)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn create_dir_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_dir_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn replace_link(temp: &Path, link: &Path) -> io::Result<()> {
    std::fs::rename(temp, link)
}

// Directory symlinks on Windows cannot be renamed over, so the swap is not atomic there.
#[cfg(windows)]
fn replace_link(temp: &Path, link: &Path) -> io::Result<()> {
    match std::fs::remove_dir(link) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::fs::rename(temp, link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::NullSink;
    use std::fs;
    use tempfile::TempDir;

    fn update(root: &Path, branch: &str, config: &Config) -> Result<SymlinkResult> {
        update_symlink(
            root,
            branch,
            config,
            &TemplateVars::new(branch),
            &mut NullSink,
        )
    }

    #[test]
    fn test_link_target_is_relative() {
        let root = Path::new("/repo");
        let branch_dir = paths::branch_dir(root, "feature/x");
        assert_eq!(
            link_target(&root.join("_context"), &branch_dir),
            PathBuf::from(".omnicontext/branches/feature-x")
        );
        assert_eq!(
            link_target(&root.join("docs/ctx"), &branch_dir),
            PathBuf::from("../.omnicontext/branches/feature-x")
        );
    }

    #[test]
    fn test_update_then_unchanged() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();

        assert_eq!(
            update(temp.path(), "main", &config).unwrap(),
            SymlinkResult::Updated
        );
        let link = temp.path().join("_context");
        let first = fs::read_link(&link).unwrap();
        assert_eq!(first, PathBuf::from(".omnicontext/branches/main"));

        assert_eq!(
            update(temp.path(), "main", &config).unwrap(),
            SymlinkResult::Unchanged
        );
        assert_eq!(fs::read_link(&link).unwrap(), first);
    }

    #[test]
    fn test_repoints_on_branch_change() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();

        update(temp.path(), "main", &config).unwrap();
        assert_eq!(
            update(temp.path(), "feature/x", &config).unwrap(),
            SymlinkResult::Updated
        );

        let link = temp.path().join("_context");
        assert_eq!(
            fs::read_link(&link).unwrap(),
            PathBuf::from(".omnicontext/branches/feature-x")
        );
        assert!(link.is_dir());
        assert!(paths::branch_dir(temp.path(), "main").is_dir());
    }

    #[test]
    fn test_regular_file_blocks_link() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("_context");
        fs::write(&link, "user data").unwrap();

        assert_eq!(
            update(temp.path(), "main", &Config::default()).unwrap(),
            SymlinkResult::NotASymlink
        );
        assert!(!link.is_symlink());
        assert_eq!(fs::read_to_string(&link).unwrap(), "user data");
    }

    #[test]
    fn test_directory_blocks_link() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("_context");
        fs::create_dir(&link).unwrap();

        assert_eq!(
            update(temp.path(), "main", &Config::default()).unwrap(),
            SymlinkResult::NotASymlink
        );
        assert!(!link.is_symlink());
    }

    #[test]
    fn test_nested_link_path_creates_parents() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            symlink: "docs/context".to_string(),
            ..Config::default()
        };

        update(temp.path(), "main", &config).unwrap();
        let link = temp.path().join("docs/context");
        assert!(link.is_symlink());
        assert!(link.is_dir());
    }

    #[test]
    fn test_dangling_link_is_repointed() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("_context");
        std::os::unix::fs::symlink("nowhere", &link).unwrap();

        assert_eq!(
            update(temp.path(), "main", &Config::default()).unwrap(),
            SymlinkResult::Updated
        );
        assert!(link.is_dir());
    }

    #[test]
    fn test_swap_leaves_no_temp_links() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        fs::create_dir(&target).unwrap();
        let link = temp.path().join("current");

        atomic_symlink_swap(&link, &target).unwrap();
        atomic_symlink_swap(&link, &target).unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2, "{names:?}");
    }

    #[test]
    fn test_read_symlink_target_missing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            read_symlink_target(&temp.path().join("missing")).unwrap(),
            None
        );
    }
}
