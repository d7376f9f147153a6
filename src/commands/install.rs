use super::CommandContext;
use anyhow::{Context, Result};
use omnicontext::config::hook;
use omnicontext::hooks::{self, InstallResult};
use omnicontext::output::Output;
use omnicontext::{paths, ContextError};
use std::path::Path;

#[derive(clap::Args)]
pub struct Args {
    #[arg(long, help = "Command the hook runs instead of this executable's on-checkout")]
    pub callback: Option<String>,

    #[arg(
        long,
        help = "Install into ~/.git-hooks and point the global core.hooksPath at it"
    )]
    pub global: bool,
}

pub fn run(args: &Args, ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
    if args.global {
        let home = ctx
            .home
            .as_deref()
            .context("could not determine home directory")?;
        return install_global(&home.join(hook::GLOBAL_HOOKS_DIR), args, ctx, output);
    }

    let root = ctx.root()?;
    match hooks::install(&root, args.callback.as_deref())? {
        InstallResult::Installed => {
            output.result(&format!("Hook installed: {}", root.display()));
        }
        InstallResult::AlreadyInstalled => output.info("Hook already installed"),
        InstallResult::HookExists => {
            output.info("Remove or rename it, then run 'omnicontext install' again");
            return Err(ContextError::HookConflict {
                path: paths::hook_path(&root),
            }
            .into());
        }
    }

    Ok(())
}

fn install_global(
    hooks_dir: &Path,
    args: &Args,
    ctx: &CommandContext,
    output: &mut dyn Output,
) -> Result<()> {
    match hooks::install_global(hooks_dir, args.callback.as_deref(), ctx.vcs)? {
        InstallResult::Installed | InstallResult::AlreadyInstalled => {
            output.result(&format!(
                "Global hooks configured: {}",
                hooks_dir.display()
            ));
            output.info("All repos will now use this hook");
            Ok(())
        }
        InstallResult::HookExists => Err(ContextError::HookConflict {
            path: hooks_dir.join(hook::NAME),
        }
        .into()),
    }
}
