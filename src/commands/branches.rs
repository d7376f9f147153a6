use super::CommandContext;
use anyhow::Result;
use omnicontext::core::{resolve_branch, sync};
use omnicontext::output::Output;
use omnicontext::paths;

pub fn run(ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
    let root = ctx.initialized_root()?;
    let branches = sync::list_branches(&root);

    if branches.is_empty() {
        output.info("No branch contexts yet");
        return Ok(());
    }

    let current = resolve_branch(ctx.vcs, &root)
        .ok()
        .map(|branch| paths::sanitize(&branch));

    output.result(&format!("Branch contexts ({}):", branches.len()));
    output.info("");
    for name in &branches {
        let count = sync::count_entries(&paths::branches_dir(&root).join(name));
        let files = if count == 1 { "file" } else { "files" };
        let marker = if current.as_deref() == Some(name.as_str()) {
            '*'
        } else {
            ' '
        };
        output.list_item(&format!("{marker} {name} ({count} {files})"));
    }

    Ok(())
}
