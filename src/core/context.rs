//! Branch context directories.
//!
//! A branch directory is created the first time its branch is synced and
//! seeded from the template chosen by `Config::template_for`. After that it
//! belongs to the user: later syncs never touch its contents, even when the
//! template has changed in the meantime.

use super::ProgressSink;
use crate::config::layout;
use crate::error::{ContextError, Result};
use crate::paths;
use crate::settings::Config;
use crate::template::{self, TemplateVars};
use filetime::FileTime;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of `create_context`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateResult {
    /// Created and populated from a template.
    Created,
    /// Created empty because the template directory does not exist.
    CreatedEmpty,
    /// The branch directory was already there; nothing was changed.
    AlreadyExists,
}

impl CreateResult {
    /// Whether this call created the directory.
    pub fn is_new(&self) -> bool {
        !matches!(self, CreateResult::AlreadyExists)
    }
}

impl fmt::Display for CreateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateResult::Created => write!(f, "created from template"),
            CreateResult::CreatedEmpty => write!(f, "created (no template)"),
            CreateResult::AlreadyExists => write!(f, "exists"),
        }
    }
}

/// Whether the branch directory for `branch` exists.
pub fn context_exists(root: &Path, branch: &str) -> bool {
    paths::branch_dir(root, branch).exists()
}

/// Create the branch directory for `branch` if it does not exist yet.
///
/// Directory creation tolerates a concurrent creator: if the directory
/// appears between the existence check and `create_dir`, the call reports
/// `AlreadyExists` and leaves population to whoever created it.
pub fn create_context(
    root: &Path,
    branch: &str,
    config: &Config,
    vars: &TemplateVars,
    progress: &mut dyn ProgressSink,
) -> Result<CreateResult> {
    let branch_dir = paths::branch_dir(root, branch);

    if branch_dir.exists() {
        progress.on_debug(&format!(
            "Context for '{branch}' already exists at {}",
            branch_dir.display()
        ));
        return Ok(CreateResult::AlreadyExists);
    }

    let branches_dir = paths::branches_dir(root);
    fs::create_dir_all(&branches_dir)
        .map_err(|e| ContextError::creation(branch, &branches_dir, e))?;

    match fs::create_dir(&branch_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            log::debug!("{} appeared concurrently", branch_dir.display());
            return Ok(CreateResult::AlreadyExists);
        }
        Err(e) => return Err(ContextError::creation(branch, &branch_dir, e)),
    }
    progress.on_step(&format!("Created {}", branch_dir.display()));

    let template_name = config.template_for(branch);
    let template_dir = paths::template_dir(root, template_name);

    let result = if template_dir.is_dir() {
        progress.on_step(&format!(
            "Copying template '{template_name}' into {}",
            branch_dir.display()
        ));
        copy_tree(&template_dir, &branch_dir, vars, true)
            .map_err(|(path, e)| ContextError::creation(branch, path, e))?;
        CreateResult::Created
    } else {
        progress.on_debug(&format!(
            "Template '{template_name}' not found at {}, leaving context empty",
            template_dir.display()
        ));
        CreateResult::CreatedEmpty
    };

    write_origin(&branch_dir, branch)
        .map_err(|e| ContextError::creation(branch, branch_dir.join(layout::BRANCH_ORIGIN_FILE), e))?;

    Ok(result)
}

/// Raw branch name recorded when `branch_dir` was created.
pub fn read_origin(branch_dir: &Path) -> Option<String> {
    fs::read_to_string(branch_dir.join(layout::BRANCH_ORIGIN_FILE))
        .ok()
        .map(|s| s.trim_end_matches('\n').to_string())
        .filter(|s| !s.is_empty())
}

/// The other branch sharing `branch`'s directory, if any.
///
/// Two branch names collide when they sanitize to the same directory name
/// (`feature/x` and `feature-x`). Directories created before origin records
/// existed have no record and never report a collision.
pub fn detect_collision(root: &Path, branch: &str) -> Option<String> {
    read_origin(&paths::branch_dir(root, branch)).filter(|origin| origin != branch)
}

fn write_origin(branch_dir: &Path, branch: &str) -> io::Result<()> {
    fs::write(
        branch_dir.join(layout::BRANCH_ORIGIN_FILE),
        format!("{branch}\n"),
    )
}

type CopyError = (PathBuf, io::Error);

/// Recursively copy `src` into the existing directory `dst`.
///
/// Text files are rendered through `template::render`. Permission bits and
/// modification times are carried over for files and directories; symlinks
/// are recreated with the same target. At the top level the origin record
/// name is reserved, so a template's own `.branch` is not copied.
fn copy_tree(
    src: &Path,
    dst: &Path,
    vars: &TemplateVars,
    top_level: bool,
) -> std::result::Result<(), CopyError> {
    let entries = fs::read_dir(src).map_err(|e| (src.to_path_buf(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| (src.to_path_buf(), e))?;
        let from = entry.path();
        if top_level && entry.file_name() == layout::BRANCH_ORIGIN_FILE {
            log::warn!(
                "template file {} uses a reserved name, skipping",
                from.display()
            );
            continue;
        }
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| (from.clone(), e))?;

        if file_type.is_dir() {
            match fs::create_dir(&to) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err((to, e)),
            }
            copy_tree(&from, &to, vars, false)?;
            copy_metadata(&from, &to).map_err(|e| (to.clone(), e))?;
        } else if file_type.is_symlink() {
            copy_symlink(&from, &to)?;
        } else {
            copy_file(&from, &to, vars)?;
        }
    }

    Ok(())
}

fn copy_file(from: &Path, to: &Path, vars: &TemplateVars) -> std::result::Result<(), CopyError> {
    let bytes = fs::read(from).map_err(|e| (from.to_path_buf(), e))?;

    let rendered = std::str::from_utf8(&bytes)
        .ok()
        .map(|text| template::render(text, vars))
        .and_then(|out| match out {
            Cow::Owned(s) => Some(s),
            Cow::Borrowed(_) => None,
        });

    match rendered {
        Some(text) => {
            log::debug!("rendering {} -> {}", from.display(), to.display());
            fs::write(to, text).map_err(|e| (to.to_path_buf(), e))?;
        }
        None => {
            log::debug!("copying {} -> {}", from.display(), to.display());
            fs::write(to, &bytes).map_err(|e| (to.to_path_buf(), e))?;
        }
    }

    copy_metadata(from, to).map_err(|e| (to.to_path_buf(), e))
}

fn copy_metadata(from: &Path, to: &Path) -> io::Result<()> {
    let metadata = fs::metadata(from)?;
    fs::set_permissions(to, metadata.permissions())?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> std::result::Result<(), CopyError> {
    let target = fs::read_link(from).map_err(|e| (from.to_path_buf(), e))?;
    std::os::unix::fs::symlink(&target, to).map_err(|e| (to.to_path_buf(), e))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, _to: &Path) -> std::result::Result<(), CopyError> {
    log::warn!("skipping symlink in template: {}", from.display());
    Ok(())
}
