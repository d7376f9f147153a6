use super::CommandContext;
use anyhow::{Context, Result};
use omnicontext::core::init::{self, InitResult};
use omnicontext::core::OutputSink;
use omnicontext::output::Output;

pub fn run(ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
    let root = ctx.root()?;

    let outcome = init::init(&root, &mut OutputSink(output))
        .with_context(|| format!("failed to initialize {}", root.display()))?;

    match outcome {
        InitResult::AlreadyInitialized(config_dir) => {
            output.info(&format!("Already initialized: {}", config_dir.display()));
        }
        InitResult::Initialized(created) => {
            output.result(&format!("Initialized: {}", created.config_dir.display()));
            output.detail("config", &created.config_file.display().to_string());
            output.detail("template", &format!("{}/", created.template_dir.display()));
            output.detail(
                "branches",
                &format!("{}/ (gitignored)", created.branches_dir.display()),
            );
            output.info("");
            output.info("Next: run 'omnicontext install' to install the hook");
        }
    }

    Ok(())
}
