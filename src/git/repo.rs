use super::{stdout_if_success, GitCommand};
use anyhow::Result;
use std::path::{Path, PathBuf};

impl GitCommand {
    /// Top-level directory of the working tree containing `dir`.
    pub fn show_toplevel(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let output = self.run_in(dir, &["rev-parse", "--show-toplevel"])?;
        Ok(stdout_if_success(&output)?.map(PathBuf::from))
    }

    /// Short name of the checked-out branch, `None` on detached HEAD.
    pub fn symbolic_ref_short_head(&self, dir: &Path) -> Result<Option<String>> {
        let output = self.run_in(dir, &["symbolic-ref", "--quiet", "--short", "HEAD"])?;
        stdout_if_success(&output)
    }
}
