//! Diagnostic logging setup.
//!
//! Library code logs through the `log` facade; this wires it to stderr via
//! `env_logger`. User-facing messages go through `Output`, not here.

use crate::config::env;
use env_logger::{Builder, Env};

/// Filter used when `OMNICONTEXT_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Install the global logger. Safe to call more than once; later calls are
/// ignored.
pub fn init_logging(verbose: bool) {
    let env = Env::new().filter_or(env::LOG, default_filter(verbose));
    let _ = Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true), "debug");
        assert_eq!(default_filter(false), "warn");
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(false);
        init_logging(true);
    }
}
