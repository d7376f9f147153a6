use super::CommandContext;
use anyhow::{Context, Result};
use omnicontext::core::symlink::SymlinkResult;
use omnicontext::core::{is_branch_name, sync, OutputSink};
use omnicontext::output::Output;
use omnicontext::settings;

#[derive(clap::Args)]
pub struct Args {
    #[arg(help = "Branch checked out before the switch")]
    pub old: String,

    #[arg(help = "Branch checked out after the switch")]
    pub new: String,

    /// Head commits passed through by the hook.
    #[arg(hide = true, num_args = 0..)]
    pub extra: Vec<String>,
}

/// Sync after a branch switch. Runs inside `git checkout`, so a blocked
/// symlink is a warning here rather than an error.
pub fn run(args: &Args, ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
    let root = ctx.root()?;
    let transition = format!("Branch: {} -> {}", args.old, args.new);

    if !settings::config_exists(&root) {
        output.result(&transition);
        return Ok(());
    }

    if !is_branch_name(&args.new) {
        output.info(&format!("{transition} (detached HEAD, skipped)"));
        return Ok(());
    }

    let result = sync::sync_branch(&root, &args.new, ctx.vcs, &mut OutputSink(output))
        .with_context(|| format!("failed to sync branch '{}'", args.new))?;

    let status = if result.create_result.is_new() {
        "new"
    } else {
        "synced"
    };
    output.result(&format!("{transition} ({status})"));

    if result.symlink_result == SymlinkResult::NotASymlink {
        output.warning(&format!(
            "{} exists and is not a symlink; context not linked",
            result.symlink_path.display()
        ));
    }
    super::sync::report_callback(&result, output);

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use omnicontext::core::init::init;
    use omnicontext::core::{NullSink, StaticVcs};
    use omnicontext::output::TestOutput;
    use omnicontext::paths;
    use std::fs;
    use tempfile::tempdir;

    fn args(old: &str, new: &str) -> Args {
        Args {
            old: old.to_string(),
            new: new.to_string(),
            extra: vec!["abc123".to_string(), "def456".to_string()],
        }
    }

    #[test]
    fn test_uninitialized_only_reports() {
        let dir = tempdir().unwrap();
        let vcs = StaticVcs::new(dir.path(), "feature/x");
        let ctx = context(&vcs, dir.path());

        let mut output = TestOutput::new();
        run(&args("main", "feature/x"), &ctx, &mut output).unwrap();
        assert_eq!(output.results(), vec!["Branch: main -> feature/x"]);
        assert!(!paths::config_dir(dir.path()).exists());
    }

    #[test]
    fn test_new_then_synced() {
        let dir = tempdir().unwrap();
        init(dir.path(), &mut NullSink).unwrap();
        let vcs = StaticVcs::new(dir.path(), "feature/x");
        let ctx = context(&vcs, dir.path());

        let mut output = TestOutput::new();
        run(&args("main", "feature/x"), &ctx, &mut output).unwrap();
        assert_eq!(output.results(), vec!["Branch: main -> feature/x (new)"]);
        assert!(paths::branch_dir(dir.path(), "feature/x").is_dir());

        let mut output = TestOutput::new();
        run(&args("main", "feature/x"), &ctx, &mut output).unwrap();
        assert_eq!(output.results(), vec!["Branch: main -> feature/x (synced)"]);
    }

    #[test]
    fn test_detached_head_skipped() {
        let dir = tempdir().unwrap();
        init(dir.path(), &mut NullSink).unwrap();
        let vcs = StaticVcs::detached(dir.path());
        let ctx = context(&vcs, dir.path());

        let mut output = TestOutput::new();
        run(&args("main", "HEAD"), &ctx, &mut output).unwrap();
        assert!(output.has_info("detached HEAD, skipped"));
        assert!(sync::list_branches(dir.path()).is_empty());
    }

    #[test]
    fn test_blocked_symlink_warns() {
        let dir = tempdir().unwrap();
        init(dir.path(), &mut NullSink).unwrap();
        fs::write(dir.path().join("_context"), "notes").unwrap();
        let vcs = StaticVcs::new(dir.path(), "main");
        let ctx = context(&vcs, dir.path());

        let mut output = TestOutput::new();
        run(&args("dev", "main"), &ctx, &mut output).unwrap();
        assert!(output.has_warning("is not a symlink"));
    }

    #[test]
    fn test_config_outside_root_fails_with_branch() {
        let dir = tempdir().unwrap();
        init(dir.path(), &mut NullSink).unwrap();
        fs::write(
            paths::config_file(dir.path()),
            r#"{ "symlink": "../elsewhere" }"#,
        )
        .unwrap();
        let vcs = StaticVcs::new(dir.path(), "main");
        let ctx = context(&vcs, dir.path());

        let err = run(&args("dev", "main"), &ctx, &mut TestOutput::new()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("failed to sync branch 'main'"), "{message}");
        assert!(message.contains("inside the repository root"), "{message}");
        assert!(!dir.path().parent().unwrap().join("elsewhere").exists());
    }
}
