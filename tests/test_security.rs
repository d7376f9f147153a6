use anyhow::Result;
use omnicontext::core::{sync, NullSink, StaticVcs};
use omnicontext::ContextError;
use omnicontext::paths::{self, sanitize};
use omnicontext::settings::{Config, TemplateRule};
use std::fs;
use std::path::{Component, Path};
use tempfile::TempDir;

/// Branch names a remote or a careless user could push.
const HOSTILE_BRANCHES: &[&str] = &[
    // Path traversal attempts
    "..",
    "../../../etc/passwd",
    "feature/../../outside",
    "feature/./x",
    "..\\..\\windows",
    // Hidden or reserved names
    ".git",
    ".branch",
    ".",
    "",
    // Control characters
    "bad\0name",
    "line\nbreak",
    "tab\there",
    // Absolute-looking names
    "/etc/passwd",
    "\\\\server\\share",
];

/// Every sanitized name must be exactly one normal, non-hidden path component.
#[test]
fn test_sanitize_produces_single_safe_component() {
    for branch in HOSTILE_BRANCHES {
        let name = sanitize(branch);

        let components: Vec<_> = Path::new(&name).components().collect();
        assert_eq!(components.len(), 1, "{branch:?} -> {name:?}");
        assert!(
            matches!(components[0], Component::Normal(_)),
            "{branch:?} -> {name:?} is not a normal component"
        );
        assert!(!name.starts_with('.'), "{branch:?} -> {name:?} is hidden");
        assert!(!name.chars().any(char::is_control), "{branch:?} -> {name:?}");
    }
}

/// Branch directories must always be direct children of the branches directory.
#[test]
fn test_branch_dir_never_escapes() {
    let root = Path::new("/repo");
    let branches_dir = paths::branches_dir(root);

    for branch in HOSTILE_BRANCHES {
        let dir = paths::branch_dir(root, branch);
        assert_eq!(
            dir.parent(),
            Some(branches_dir.as_path()),
            "{branch:?} escaped to {}",
            dir.display()
        );
    }
}

/// Syncing hostile branch names creates nothing outside `.omnicontext/branches/`.
#[cfg(unix)]
#[test]
fn test_sync_hostile_branches_stays_contained() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("repo");
    fs::create_dir(&root)?;

    for branch in ["../../escape", "feature/../../../x", ".hidden"] {
        let vcs = StaticVcs::new(&root, branch);
        sync::sync_branch(&root, branch, &vcs, &mut NullSink)?;
    }

    let outside: Vec<_> = fs::read_dir(temp.path())?
        .flatten()
        .map(|e| e.file_name())
        .collect();
    assert_eq!(outside, vec!["repo"]);

    let at_root: Vec<_> = fs::read_dir(&root)?
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(at_root.len(), 2, "{at_root:?}");
    assert!(at_root.contains(&".omnicontext".to_string()));
    assert!(at_root.contains(&"_context".to_string()));

    let names = sync::list_branches(&root);
    assert_eq!(names.len(), 3, "{names:?}");
    Ok(())
}

/// A template name from config cannot reach files outside `templates/`.
#[cfg(unix)]
#[test]
fn test_template_rule_cannot_read_outside_templates() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path();

    let secret_dir = root.join(".omnicontext").join("secret");
    fs::create_dir_all(&secret_dir)?;
    fs::write(secret_dir.join("key.txt"), "do not copy")?;

    Config {
        template_rules: vec![TemplateRule::new("", "../secret")],
        ..Config::default()
    }
    .save(root)?;

    let vcs = StaticVcs::new(root, "main");
    let result = sync::sync_branch(root, "main", &vcs, &mut NullSink)?;
    assert!(!result.branch_dir.join("key.txt").exists());
    Ok(())
}

/// A committed config cannot place the working symlink outside the repository.
#[cfg(unix)]
#[test]
fn test_symlink_config_cannot_escape_root() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("repo");
    fs::create_dir(&root)?;
    let outside = temp.path().join("outside_link");
    std::os::unix::fs::symlink("elsewhere", &outside)?;

    Config {
        symlink: "../outside_link".to_string(),
        ..Config::default()
    }
    .save(&root)?;

    let vcs = StaticVcs::new(&root, "main");
    let err = sync::sync_branch(&root, "main", &vcs, &mut NullSink).unwrap_err();
    assert!(matches!(err, ContextError::ConfigParse { .. }), "{err}");
    assert_eq!(fs::read_link(&outside)?, Path::new("elsewhere"));
    assert!(!paths::branch_dir(&root, "main").exists());
    Ok(())
}

/// Shell metacharacters in a branch name are passed to the on-switch command
/// through the environment untouched.
#[cfg(unix)]
#[test]
fn test_branch_env_var_is_verbatim() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path();
    Config {
        on_switch: Some("printf '%s' \"$OMNICONTEXT_BRANCH\" > branch.out".to_string()),
        ..Config::default()
    }
    .save(root)?;

    let branch = "feat/$(touch pwned);x";
    let vcs = StaticVcs::new(root, branch);
    sync::sync_branch(root, branch, &vcs, &mut NullSink)?;

    assert_eq!(fs::read_to_string(root.join("branch.out"))?, branch);
    assert!(!root.join("pwned").exists());
    Ok(())
}
