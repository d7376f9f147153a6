//! Variable substitution for template files and the on-switch command.
//!
//! Template files use double braces: `{{branch}}`, `{{date}}`, `{{author}}`.
//! The on-switch command uses single braces: `{branch}`.
//! Unknown variables are left untouched in both forms.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid template pattern"))
}

/// Values available to template files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    /// Raw (unsanitized) branch name.
    pub branch: String,
    /// Local date, `YYYY-MM-DD`.
    pub date: String,
    /// Author name from git config, empty when unset.
    pub author: String,
}

impl TemplateVars {
    /// Variables for `branch` with today's date and no author.
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            author: String::new(),
        }
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author.unwrap_or_default();
        self
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "branch" => Some(&self.branch),
            "date" => Some(&self.date),
            "author" => Some(&self.author),
            _ => None,
        }
    }
}

/// Render `{{var}}` placeholders in `content`.
///
/// Borrows the input unchanged when nothing was substituted.
pub fn render<'a>(content: &'a str, vars: &TemplateVars) -> Cow<'a, str> {
    var_pattern().replace_all(content, |caps: &Captures| {
        let name = &caps[1];
        vars.lookup(name).unwrap_or(&caps[0]).to_string()
    })
}

/// Substitute `{branch}` in the on-switch command.
pub fn substitute_branch(command: &str, branch: &str) -> String {
    command.replace("{branch}", branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> TemplateVars {
        TemplateVars {
            branch: "feature/login".to_string(),
            date: "2024-01-15".to_string(),
            author: "Ada".to_string(),
        }
    }

    #[test]
    fn test_render_known_variables() {
        let out = render("# {{branch}}\n{{date}} by {{author}}", &vars());
        assert_eq!(out, "# feature/login\n2024-01-15 by Ada");
    }

    #[test]
    fn test_render_leaves_unknown_variables() {
        let out = render("{{branch}} {{unknown}} {single}", &vars());
        assert_eq!(out, "feature/login {{unknown}} {single}");
    }

    #[test]
    fn test_render_without_placeholders_borrows() {
        let out = render("plain text", &vars());
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_new_uses_iso_date() {
        let v = TemplateVars::new("main");
        assert_eq!(v.date.len(), 10);
        assert_eq!(v.date.as_bytes()[4], b'-');
        assert!(v.author.is_empty());
    }

    #[test]
    fn test_substitute_branch() {
        assert_eq!(
            substitute_branch("echo {branch} > {branch}.log", "main"),
            "echo main > main.log"
        );
        assert_eq!(substitute_branch("make ctx", "main"), "make ctx");
    }
}
