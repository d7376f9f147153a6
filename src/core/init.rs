//! Repository initialization.

use super::ProgressSink;
use crate::config::{layout, seed};
use crate::error::{ContextError, Result};
use crate::paths;
use crate::settings::{self, Config};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths created by a fresh `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub template_dir: PathBuf,
    pub branches_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitResult {
    Initialized(InitPaths),
    /// `.omnicontext/` was already present; nothing was written.
    AlreadyInitialized(PathBuf),
}

/// Create the `.omnicontext/` layout at `root` with the default config,
/// the default template and the ignore rules.
pub fn init(root: &Path, progress: &mut dyn ProgressSink) -> Result<InitResult> {
    let config_dir = paths::config_dir(root);
    if settings::config_exists(root) {
        return Ok(InitResult::AlreadyInitialized(config_dir));
    }

    let config = Config::default();
    let template_dir = paths::template_dir(root, &config.default_template);
    let branches_dir = paths::branches_dir(root);

    for dir in [&template_dir, &branches_dir] {
        fs::create_dir_all(dir).map_err(|e| ContextError::io("create directory", dir, e))?;
        progress.on_step(&format!("Created {}", dir.display()));
    }

    config.save(root)?;
    write_file(&template_dir.join(layout::DEFAULT_CONTEXT_FILE), seed::CONTEXT_MD, progress)?;
    write_file(&branches_dir.join(layout::GITIGNORE), seed::GITIGNORE_BRANCHES, progress)?;
    write_file(&config_dir.join(layout::GITIGNORE), seed::GITIGNORE_ROOT, progress)?;

    Ok(InitResult::Initialized(InitPaths {
        config_file: paths::config_file(root),
        config_dir,
        template_dir,
        branches_dir,
    }))
}

fn write_file(path: &Path, contents: &str, progress: &mut dyn ProgressSink) -> Result<()> {
    fs::write(path, contents).map_err(|e| ContextError::io("write", path, e))?;
    progress.on_step(&format!("Wrote {}", path.display()));
    Ok(())
}
