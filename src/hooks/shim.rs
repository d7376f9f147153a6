//! Post-checkout hook script generation.
//!
//! The script is placed in `.git/hooks/post-checkout` and calls back into
//! `omnicontext on-checkout <old> <new>` on branch checkouts only. File
//! checkouts (`git checkout -- path`) pass `0` as the third argument and are
//! ignored.

use crate::config::hook;
use std::path::PathBuf;

/// Program name used when the running executable cannot be located.
const PROGRAM: &str = env!("CARGO_PKG_NAME");

/// Generate the hook script invoking `callback`.
pub fn hook_content(callback: &str) -> String {
    format!(
        r#"#!/bin/sh
{marker}
# Installed by omnicontext {version}. To uninstall: omnicontext uninstall
PREV_HEAD="$1"
NEW_HEAD="$2"
CHECKOUT_TYPE="$3"

[ "$CHECKOUT_TYPE" = "1" ] || exit 0

OLD_BRANCH=$(git rev-parse --abbrev-ref '@{{-1}}' 2>/dev/null)
[ -n "$OLD_BRANCH" ] || OLD_BRANCH="$PREV_HEAD"
NEW_BRANCH=$(git rev-parse --abbrev-ref HEAD 2>/dev/null)

{callback} "$OLD_BRANCH" "$NEW_BRANCH" "$PREV_HEAD" "$NEW_HEAD"
"#,
        marker = hook::MARKER,
        version = env!("OMNICONTEXT_VERSION"),
    )
}

/// Whether `content` is a hook script written by omnicontext.
pub fn is_managed(content: &str) -> bool {
    content.contains(hook::MARKER)
}

/// Default callback: the running executable followed by `on-checkout`.
pub fn default_callback() -> String {
    format!(
        "\"{}\" {}",
        executable_path().display(),
        hook::CALLBACK_SUBCOMMAND
    )
}

/// Locate the omnicontext executable.
///
/// Tries the running executable, then `PATH`, then falls back to the bare
/// program name.
fn executable_path() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        return exe;
    }
    log::debug!("current_exe unavailable, searching PATH for {PROGRAM}");
    which::which(PROGRAM).unwrap_or_else(|_| PathBuf::from(PROGRAM))
}
