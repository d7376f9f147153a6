//! Per-repository settings for omnicontext.
//!
//! Settings live in `.omnicontext/config.json` at the repository root.
//! A missing file is not an error: every field falls back to a built-in
//! default, and so does any field absent from the document.
//!
//! # Keys
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `symlink` | `"_context"` | Working symlink, relative to the repository root; `..` is rejected |
//! | `on_switch` | none | Shell command run after each sync; `{branch}` is substituted verbatim |
//! | `default_template` | `"default"` | Template used when no rule matches |
//! | `template_rules` | `[]` | Ordered `{prefix, template}` rules, first match wins |
//!
//! `{branch}` is pasted into the command unquoted, and git allows `;`, `$()`
//! and backticks in branch names. Do not use it where branch names come from
//! untrusted sources; read `$OMNICONTEXT_BRANCH` instead, which carries the
//! same name through the environment.
//!
//! Each branch directory holds a `.branch` file recording the raw branch name.
//! The name is reserved: a `.branch` file at the top of a template is not
//! copied.
//!
//! # Example
//!
//! ```json
//! {
//!   "symlink": "_context",
//!   "on_switch": "echo switched to {branch}",
//!   "default_template": "default",
//!   "template_rules": [
//!     { "prefix": "feature/", "template": "feature" },
//!     { "prefix": "bugfix/", "template": "bugfix" }
//!   ]
//! }
//! ```

use crate::error::{ContextError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Default values for settings.
pub mod defaults {
    /// Default working symlink path.
    pub const SYMLINK: &str = "_context";

    /// Default template name.
    pub const DEFAULT_TEMPLATE: &str = "default";
}

fn default_symlink() -> String {
    defaults::SYMLINK.to_string()
}

fn default_template() -> String {
    defaults::DEFAULT_TEMPLATE.to_string()
}

/// Picks a template for branches whose name starts with `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRule {
    /// Literal prefix tested against the raw branch name.
    pub prefix: String,
    /// Template directory name under `.omnicontext/templates/`.
    pub template: String,
}

impl TemplateRule {
    pub fn new(prefix: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            template: template.into(),
        }
    }
}

/// The persisted settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Working symlink path, relative to the repository root.
    #[serde(default = "default_symlink")]
    pub symlink: String,

    /// Command run after each sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_switch: Option<String>,

    /// Template used when no rule matches.
    #[serde(default = "default_template")]
    pub default_template: String,

    /// Ordered template selection rules.
    #[serde(default)]
    pub template_rules: Vec<TemplateRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symlink: default_symlink(),
            on_switch: None,
            default_template: default_template(),
            template_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Load settings for the repository at `root`.
    ///
    /// Returns defaults when the config file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_file(root);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(ContextError::io("read", path, e)),
        };

        let config: Self =
            serde_json::from_str(&contents).map_err(|e| ContextError::ConfigParse {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        config.validate(&path)?;
        Ok(config)
    }

    /// Write settings for the repository at `root`, replacing any existing file.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_file(root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ContextError::io("create directory", parent, e))?;
        }

        let mut contents = serde_json::to_string_pretty(self)
            .map_err(|e| ContextError::io("serialize config for", &path, io::Error::other(e)))?;
        contents.push('\n');

        fs::write(&path, contents).map_err(|e| ContextError::io("write", &path, e))?;
        log::debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Template name for `branch`: the first rule whose prefix matches,
    /// otherwise the default template.
    ///
    /// Matching is a plain string prefix test, not path-aware:
    /// a rule for `feat` also matches `feature/login`.
    pub fn template_for(&self, branch: &str) -> &str {
        self.template_rules
            .iter()
            .find(|rule| branch.starts_with(&rule.prefix))
            .map(|rule| rule.template.as_str())
            .unwrap_or(&self.default_template)
    }

    /// Absolute path of the working symlink.
    pub fn symlink_path(&self, root: &Path) -> PathBuf {
        root.join(&self.symlink)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.symlink.trim().is_empty() {
            return Err(ContextError::ConfigParse {
                path: path.to_path_buf(),
                reason: "`symlink` must not be empty".to_string(),
            });
        }

        let symlink = Path::new(&self.symlink);
        let mut has_name = false;
        for component in symlink.components() {
            match component {
                Component::Normal(_) => has_name = true,
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(self.symlink_outside_root(path));
                }
            }
        }

        if !has_name {
            return Err(self.symlink_outside_root(path));
        }

        Ok(())
    }

    fn symlink_outside_root(&self, path: &Path) -> ContextError {
        ContextError::ConfigParse {
            path: path.to_path_buf(),
            reason: format!(
                "`symlink` must be a path inside the repository root, got '{}'",
                self.symlink
            ),
        }
    }
}

/// Whether `.omnicontext/` exists at `root`.
pub fn config_exists(root: &Path) -> bool {
    paths::config_dir(root).is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rules() -> Vec<TemplateRule> {
        vec![
            TemplateRule::new("feature/", "feature"),
            TemplateRule::new("bugfix/", "bugfix"),
        ]
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.symlink, "_context");
        assert_eq!(config.on_switch, None);
        assert_eq!(config.default_template, "default");
        assert!(config.template_rules.is_empty());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let config = Config {
            symlink: ".my-context".to_string(),
            on_switch: Some("echo {branch}".to_string()),
            default_template: "base".to_string(),
            template_rules: rules(),
        };
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.template_rules[0].prefix, "feature/");
        assert_eq!(loaded.template_rules[1].prefix, "bugfix/");
    }

    #[test]
    fn test_save_creates_parent_and_overwrites() {
        let dir = tempdir().unwrap();
        assert!(!config_exists(dir.path()));

        Config::default().save(dir.path()).unwrap();
        assert!(config_exists(dir.path()));

        let updated = Config {
            symlink: "ctx".to_string(),
            ..Config::default()
        };
        updated.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().symlink, "ctx");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = tempdir().unwrap();
        let path = paths::config_file(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "on_switch": "make ctx" }"#).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.symlink, defaults::SYMLINK);
        assert_eq!(config.on_switch.as_deref(), Some("make ctx"));
        assert_eq!(config.default_template, defaults::DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_malformed_config_names_path() {
        let dir = tempdir().unwrap();
        let path = paths::config_file(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContextError::ConfigParse { .. }));
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_empty_symlink_is_rejected() {
        let dir = tempdir().unwrap();
        let path = paths::config_file(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "symlink": "  " }"#).unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContextError::ConfigParse { .. }));
    }

    #[test]
    fn test_symlink_outside_root_is_rejected() {
        let dir = tempdir().unwrap();
        let path = paths::config_file(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        for symlink in ["../outside_link", "ctx/../../up", "/tmp/ctx", ".", "./"] {
            fs::write(&path, format!(r#"{{ "symlink": "{symlink}" }}"#)).unwrap();
            let err = Config::load(dir.path()).unwrap_err();
            assert!(
                matches!(err, ContextError::ConfigParse { .. }),
                "{symlink}: {err}"
            );
        }
    }

    #[test]
    fn test_nested_symlink_is_accepted() {
        let dir = tempdir().unwrap();
        let config = Config {
            symlink: "docs/context".to_string(),
            ..Config::default()
        };
        config.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().symlink, "docs/context");
    }

    #[test]
    fn test_template_for_first_match_wins() {
        let config = Config {
            template_rules: rules(),
            ..Config::default()
        };
        assert_eq!(config.template_for("feature/login"), "feature");
        assert_eq!(config.template_for("bugfix/123"), "bugfix");
        assert_eq!(config.template_for("main"), "default");
        assert_eq!(config.template_for("develop"), "default");
    }

    #[test]
    fn test_template_for_respects_rule_order() {
        let config = Config {
            template_rules: vec![
                TemplateRule::new("feat", "broad"),
                TemplateRule::new("feature/", "narrow"),
            ],
            ..Config::default()
        };
        assert_eq!(config.template_for("feature/login"), "broad");
    }
}
