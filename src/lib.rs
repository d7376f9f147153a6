//! omnicontext - per-branch context directories for Git repositories.
//!
//! Each branch gets its own directory under `.omnicontext/branches/`, seeded
//! from a template the first time the branch is seen. A symlink at the
//! repository root always points at the current branch's directory, and a
//! `post-checkout` hook keeps it in sync as branches change.

pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod hooks;
pub mod logging;
pub mod output;
pub mod paths;
pub mod settings;
pub mod styles;
pub mod template;

pub use error::{ContextError, Result};

/// Version string, including branch and commit for development builds.
pub const VERSION: &str = env!("OMNICONTEXT_VERSION_DISPLAY");
