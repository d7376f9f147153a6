//! Terminal text styling utilities.
//!
//! Provides clean abstractions for ANSI terminal styling, keeping escape codes
//! isolated from application code.

use std::io::IsTerminal;

/// ANSI escape code for bold text.
pub const BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text.
pub const DIM: &str = "\x1b[2m";

pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";

/// ANSI escape code to reset all styling.
pub const RESET: &str = "\x1b[0m";

fn no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Whether stdout should be styled.
pub fn colors_enabled() -> bool {
    !no_color() && std::io::stdout().is_terminal()
}

/// Whether stderr should be styled.
pub fn colors_enabled_stderr() -> bool {
    !no_color() && std::io::stderr().is_terminal()
}
