/// Fixed names and values shared across omnicontext.
///
/// This module centralizes the on-disk layout, the hook contract and the
/// environment variables so the rest of the codebase never hardcodes them.
/// On-disk layout under the repository root
pub mod layout {
    /// Top-level directory holding config, templates and branch contexts
    pub const CONFIG_DIR: &str = ".omnicontext";

    /// Persisted settings document inside `CONFIG_DIR`
    pub const CONFIG_FILE: &str = "config.json";

    /// Directory of named templates inside `CONFIG_DIR`
    pub const TEMPLATES_DIR: &str = "templates";

    /// Directory of per-branch contexts inside `CONFIG_DIR`
    pub const BRANCHES_DIR: &str = "branches";

    /// Hidden file inside a branch directory recording the raw branch name
    pub const BRANCH_ORIGIN_FILE: &str = ".branch";

    /// Seed file written into the default template by `init`
    pub const DEFAULT_CONTEXT_FILE: &str = "context.md";

    /// Ignore file name used for both generated ignore rules
    pub const GITIGNORE: &str = ".gitignore";
}

/// Post-checkout hook contract
pub mod hook {
    /// Git hook slot the tool manages
    pub const NAME: &str = "post-checkout";

    /// Literal line proving a hook file is owned by omnicontext
    pub const MARKER: &str = "# omnicontext-managed";

    /// Sub-invocation the hook calls back into
    pub const CALLBACK_SUBCOMMAND: &str = "on-checkout";

    /// Directory under the home directory used by `install --global`
    pub const GLOBAL_HOOKS_DIR: &str = ".git-hooks";
}

/// Environment variables read or exported by omnicontext
pub mod env {
    /// Exported to the on-switch command with the raw branch name
    pub const BRANCH: &str = "OMNICONTEXT_BRANCH";

    /// Log filter for diagnostics (env_logger syntax)
    pub const LOG: &str = "OMNICONTEXT_LOG";
}

/// Seed content written by `init`
pub mod seed {
    /// Default context file placed in the default template
    pub const CONTEXT_MD: &str = "# Branch Context: {{branch}}

Created: {{date}} by {{author}}

## Objective

N/A

## Notes

N/A

## Tasks

- [ ] TODO
";

    /// Ignore rules for the branches directory (local only)
    pub const GITIGNORE_BRANCHES: &str = "# Ignore all branch contexts (local only)
*
!.gitignore
";

    /// Ignore rules for the config directory
    pub const GITIGNORE_ROOT: &str = "# Ignore branch data and generated files
branches/
*.json
!config.json
";
}
