//! Path resolution for the `.omnicontext/` layout.
//!
//! Pure functions: nothing here touches the filesystem.
//!
//! ```text
//! <root>/
//! ├── .git/hooks/post-checkout        # managed hook
//! ├── _context -> .omnicontext/branches/feature-login
//! └── .omnicontext/
//!     ├── config.json
//!     ├── templates/
//!     │   └── default/
//!     └── branches/
//!         ├── main/
//!         └── feature-login/
//! ```

use crate::config::{hook, layout};
use std::path::{Path, PathBuf};

/// Character substituted for path separators in branch names.
pub const SEPARATOR_FILLER: char = '-';

/// Character substituted for anything that would escape or hide a directory.
const ESCAPE_FILLER: char = '_';

/// Returns `{root}/.omnicontext`
pub fn config_dir(root: &Path) -> PathBuf {
    root.join(layout::CONFIG_DIR)
}

/// Returns `{root}/.omnicontext/config.json`
pub fn config_file(root: &Path) -> PathBuf {
    config_dir(root).join(layout::CONFIG_FILE)
}

/// Returns `{root}/.omnicontext/templates`
pub fn templates_dir(root: &Path) -> PathBuf {
    config_dir(root).join(layout::TEMPLATES_DIR)
}

/// Returns `{root}/.omnicontext/templates/{name}`
///
/// The template name goes through [`sanitize`] so a config entry cannot
/// point outside the templates directory.
pub fn template_dir(root: &Path, name: &str) -> PathBuf {
    templates_dir(root).join(sanitize(name))
}

/// Returns `{root}/.omnicontext/branches`
pub fn branches_dir(root: &Path) -> PathBuf {
    config_dir(root).join(layout::BRANCHES_DIR)
}

/// Returns `{root}/.omnicontext/branches/{sanitize(branch)}`
pub fn branch_dir(root: &Path, branch: &str) -> PathBuf {
    branches_dir(root).join(sanitize(branch))
}

/// Returns `{root}/.git/hooks`
pub fn hooks_dir(root: &Path) -> PathBuf {
    root.join(".git").join("hooks")
}

/// Returns `{root}/.git/hooks/post-checkout`
pub fn hook_path(root: &Path) -> PathBuf {
    hooks_dir(root).join(hook::NAME)
}

/// Map a branch name to a single directory name.
///
/// Every `/` or `\` becomes `-`, so `feature/login` maps to `feature-login`.
/// Segments equal to `.` or `..`, a leading `.`, and control characters are
/// replaced with `_`, which guarantees the result is one non-hidden path
/// component that stays inside the branches directory. An empty name maps
/// to `_`.
///
/// Distinct branch names can map to the same directory
/// (`feature/x` and `feature-x`); callers detect that through the origin
/// record written on creation rather than here.
pub fn sanitize(branch: &str) -> String {
    let mut name = branch
        .split(['/', '\\'])
        .map(|segment| match segment {
            "." | ".." => ESCAPE_FILLER.to_string().repeat(segment.len()),
            other => other
                .chars()
                .map(|c| if c.is_control() { ESCAPE_FILLER } else { c })
                .collect(),
        })
        .collect::<Vec<String>>()
        .join(&SEPARATOR_FILLER.to_string());

    if name.starts_with('.') {
        name.replace_range(..1, &ESCAPE_FILLER.to_string());
    }

    if name.is_empty() {
        name.push(ESCAPE_FILLER);
    }

    name
}
