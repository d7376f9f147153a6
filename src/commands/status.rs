use super::CommandContext;
use anyhow::{Context, Result};
use omnicontext::core::{resolve_branch, symlink, sync};
use omnicontext::hooks;
use omnicontext::output::Output;
use omnicontext::paths;
use omnicontext::settings::{self, Config};

pub fn run(ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
    let root = ctx.root()?;
    let branch = resolve_branch(ctx.vcs, &root).ok();
    let initialized = settings::config_exists(&root);

    output.detail("Repository", &root.display().to_string());
    output.detail("Branch", branch.as_deref().unwrap_or("(detached)"));
    output.detail("Initialized", if initialized { "yes" } else { "no" });
    output.detail(
        "Hook",
        &hooks::hook_state(&paths::hook_path(&root)).to_string(),
    );

    if initialized {
        let config = Config::load(&root).context("cannot report symlink status")?;
        let link_path = config.symlink_path(&root);
        let link_state = match symlink::read_symlink_target(&link_path) {
            Ok(Some(target)) => format!("active -> {}", target.display()),
            _ if link_path.exists() => "blocked: not a symlink".to_string(),
            _ => "not set".to_string(),
        };
        output.detail("Symlink", &format!("{} ({link_state})", config.symlink));
        output.detail(
            "Contexts",
            &match sync::list_branches(&root).len() {
                1 => "1 branch".to_string(),
                n => format!("{n} branches"),
            },
        );
    }

    if let Some(global) = ctx.vcs.global_hooks_path() {
        output.detail("Global", &global);
    }

    Ok(())
}
