//! Adapter bridging core traits to the command layer.

use super::ProgressSink;
use crate::output::Output;

/// Adapter that forwards `ProgressSink` calls to an `Output` implementation.
///
/// # Example
///
/// ```ignore
/// let mut output = CliOutput::new(config);
/// let mut sink = OutputSink(&mut output);
/// core::sync::sync_branch(&root, &branch, &git, &mut sink)?;
/// ```
pub struct OutputSink<'a>(pub &'a mut dyn Output);

impl ProgressSink for OutputSink<'_> {
    fn on_step(&mut self, msg: &str) {
        self.0.step(msg);
    }

    fn on_warning(&mut self, msg: &str) {
        self.0.warning(msg);
    }

    fn on_debug(&mut self, msg: &str) {
        self.0.debug(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TestOutput;

    #[test]
    fn test_output_sink_forwards_warnings() {
        let mut output = TestOutput::new();
        let mut sink = OutputSink(&mut output);
        sink.on_step("Created /repo/.omnicontext/branches/main");
        sink.on_warning("branch 'feature-x' shares its context with 'feature/x'");

        assert!(output.has_warning("shares its context"));
    }
}
