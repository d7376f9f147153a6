use super::{stdout_if_success, GitCommand};
use anyhow::Result;
use std::path::Path;

impl GitCommand {
    /// Get a git config value as seen from `dir` (respects local + global config)
    pub fn config_get(&self, dir: &Path, key: &str) -> Result<Option<String>> {
        let output = self.run_in(dir, &["config", "--get", key])?;
        // Exit code 1 means the key was not found, which is not an error
        stdout_if_success(&output)
    }

    /// Get a git config value from global config only
    pub fn config_get_global(&self, key: &str) -> Result<Option<String>> {
        let output = self.run(&["config", "--global", "--get", key])?;
        stdout_if_success(&output)
    }

    /// Set a global git config value
    pub fn config_set_global(&self, key: &str, value: &str) -> Result<()> {
        let output = self.run(&["config", "--global", key, value])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Git config failed: {}", stderr.trim());
        }

        Ok(())
    }

    /// Unset a global git config value. Unsetting a missing key succeeds.
    pub fn config_unset_global(&self, key: &str) -> Result<()> {
        let output = self.run(&["config", "--global", "--unset", key])?;

        // Exit code 5 means the key was not set
        if !output.status.success() && output.status.code() != Some(5) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Git config --unset failed: {}", stderr.trim());
        }

        Ok(())
    }
}
