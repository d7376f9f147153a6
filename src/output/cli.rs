//! Terminal output.

use super::{Output, OutputConfig};
use crate::styles::{self, colors_enabled, colors_enabled_stderr};

/// Width of the `key:` column, wide enough for `Initialized:`.
const DETAIL_KEY_WIDTH: usize = 13;

/// Writes to stdout, with warnings and errors on stderr.
///
/// Styling is applied per stream, only when that stream is a terminal and
/// `NO_COLOR` is unset.
#[derive(Debug)]
pub struct CliOutput {
    config: OutputConfig,
}

impl CliOutput {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn print(&self, style: &str, line: &str) {
        if colors_enabled() {
            println!("{style}{line}{}", styles::RESET);
        } else {
            println!("{line}");
        }
    }

    fn eprint(&self, style: &str, label: &str, msg: &str) {
        if colors_enabled_stderr() {
            eprintln!("{style}{label}:{} {msg}", styles::RESET);
        } else {
            eprintln!("{label}: {msg}");
        }
    }
}

fn detail_line(key: &str, value: &str) -> String {
    let label = format!("{key}:");
    format!("{label:<DETAIL_KEY_WIDTH$}{value}")
}

impl Output for CliOutput {
    fn info(&mut self, msg: &str) {
        if !self.config.quiet {
            println!("{msg}");
        }
    }

    fn warning(&mut self, msg: &str) {
        self.eprint(styles::YELLOW, "warning", msg);
    }

    fn error(&mut self, msg: &str) {
        self.eprint(styles::RED, "error", msg);
    }

    fn debug(&mut self, msg: &str) {
        if self.config.verbose {
            self.print(styles::DIM, &format!("debug: {msg}"));
        }
    }

    fn step(&mut self, msg: &str) {
        if self.config.verbose && !self.config.quiet {
            self.print(styles::DIM, msg);
        }
    }

    fn result(&mut self, msg: &str) {
        if !self.config.quiet {
            self.print(styles::GREEN, msg);
        }
    }

    fn detail(&mut self, key: &str, value: &str) {
        if !self.config.quiet {
            if colors_enabled() {
                let label = format!("{key}:");
                println!(
                    "{}{label:<DETAIL_KEY_WIDTH$}{}{value}",
                    styles::BOLD,
                    styles::RESET
                );
            } else {
                println!("{}", detail_line(key, value));
            }
        }
    }

    fn list_item(&mut self, item: &str) {
        if !self.config.quiet {
            println!("  {item}");
        }
    }
}
