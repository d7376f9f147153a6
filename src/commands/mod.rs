//! Command modules for omnicontext.
//!
//! Each subcommand has its own module with a `run` function taking the
//! shared `CommandContext` and an `Output`, so the same code path serves
//! the terminal and the tests.

pub mod branches;
pub mod init;
pub mod install;
pub mod on_checkout;
pub mod status;
pub mod sync;
pub mod uninstall;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use omnicontext::core::{resolve_root, VcsProvider};
use omnicontext::output::Output;
use omnicontext::settings;
use omnicontext::ContextError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "omnicontext")]
#[command(version = omnicontext::VERSION)]
#[command(about = "Git branch context manager")]
#[command(long_about = r#"
Keeps a separate context directory for every branch of a Git repository.

Each branch gets its own directory under .omnicontext/branches/, created
from a template the first time the branch is checked out. A symlink at the
repository root (default: _context) always points at the current branch's
directory. Install the post-checkout hook to switch it automatically.
"#)]
#[command(after_help = r#"Examples:
  omnicontext init        # initialize project
  omnicontext install     # install hook
  omnicontext sync        # sync current branch
  omnicontext branches    # list contexts

Exit codes:
  0 - success
  1 - error"#)]
#[command(disable_version_flag = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[arg(short = 'v', long = "version", action = ArgAction::Version, help = "Print version")]
    pub version: Option<bool>,

    #[arg(long, global = true, help = "Show detailed progress and diagnostics")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize .omnicontext/ in the current repository
    Init,
    /// Install the post-checkout hook
    Install(install::Args),
    /// Remove the post-checkout hook
    Uninstall(uninstall::Args),
    /// Sync the context for the current branch
    Sync,
    /// List all branch contexts
    Branches,
    /// Show repository and hook status
    Status,
    /// Called by the hook on branch switch
    OnCheckout(on_checkout::Args),
}

/// Environment a command runs in.
pub struct CommandContext<'a> {
    pub cwd: PathBuf,
    pub vcs: &'a dyn VcsProvider,
    /// Home directory, for `install --global`.
    pub home: Option<PathBuf>,
}

impl<'a> CommandContext<'a> {
    pub fn new(cwd: PathBuf, vcs: &'a dyn VcsProvider) -> Self {
        Self {
            cwd,
            vcs,
            home: dirs::home_dir(),
        }
    }

    /// Repository root for the working directory.
    pub fn root(&self) -> Result<PathBuf> {
        Ok(resolve_root(self.vcs, &self.cwd)?)
    }

    /// Repository root, requiring `.omnicontext/` to exist.
    pub fn initialized_root(&self) -> Result<PathBuf> {
        let root = self.root()?;
        if !settings::config_exists(&root) {
            return Err(ContextError::NotInitialized { root }.into());
        }
        Ok(root)
    }
}

/// Dispatch a parsed command.
pub fn run(command: Command, ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
    match command {
        Command::Init => init::run(ctx, output),
        Command::Install(args) => install::run(&args, ctx, output),
        Command::Uninstall(args) => uninstall::run(&args, ctx, output),
        Command::Sync => sync::run(ctx, output),
        Command::Branches => branches::run(ctx, output),
        Command::Status => status::run(ctx, output),
        Command::OnCheckout(args) => on_checkout::run(&args, ctx, output),
    }
}
