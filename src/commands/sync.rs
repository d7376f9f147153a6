use super::CommandContext;
use anyhow::{Context, Result};
use omnicontext::core::sync::{self, SyncResult};
use omnicontext::core::{resolve_branch, OutputSink};
use omnicontext::output::Output;

pub fn run(ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
    let root = ctx.initialized_root()?;
    let branch = resolve_branch(ctx.vcs, &root)?;

    let result = sync::sync_branch(&root, &branch, ctx.vcs, &mut OutputSink(output))
        .with_context(|| format!("failed to sync branch '{branch}'"))?;

    output.detail("Branch", &result.branch);
    output.detail("Context", &result.branch_dir.display().to_string());
    output.detail(
        "Symlink",
        &format!(
            "{} -> {}",
            result.symlink_path.display(),
            result.branch_dir.display()
        ),
    );
    output.detail("Status", &result.create_result.to_string());
    report_callback(&result, output);

    result.into_checked()?;
    Ok(())
}

/// Warn when the on-switch command failed. The sync itself still counts as
/// successful.
pub(crate) fn report_callback(result: &SyncResult, output: &mut dyn Output) {
    let Some(callback) = &result.callback else {
        return;
    };
    match callback.exit_code {
        Some(0) => {}
        Some(code) => output.warning(&format!(
            "on_switch command exited with status {code}: {}",
            callback.command
        )),
        None => output.warning(&format!(
            "on_switch command did not complete: {}",
            callback.command
        )),
    }
}
