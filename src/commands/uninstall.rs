use super::CommandContext;
use anyhow::Result;
use omnicontext::hooks::{self, UninstallResult};
use omnicontext::output::Output;
use omnicontext::paths;

#[derive(clap::Args)]
pub struct Args {
    #[arg(long, help = "Unset the global core.hooksPath instead")]
    pub global: bool,
}

pub fn run(args: &Args, ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
    if args.global {
        ctx.vcs.unset_global_hooks_path()?;
        output.result("Global hooks path unset");
        return Ok(());
    }

    let root = ctx.root()?;
    match hooks::uninstall(&root)? {
        UninstallResult::Uninstalled => output.result("Hook removed"),
        UninstallResult::NotInstalled => output.info("No hook installed"),
        UninstallResult::NotManaged => anyhow::bail!(
            "hook exists but not managed by omnicontext: {}",
            paths::hook_path(&root).display()
        ),
    }

    Ok(())
}
