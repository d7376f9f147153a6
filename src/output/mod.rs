//! User-facing output for the `omnicontext` commands.
//!
//! Commands write through `&mut dyn Output` so the same handler can print to
//! the terminal or be checked in a unit test:
//!
//! ```ignore
//! pub fn run(ctx: &CommandContext, output: &mut dyn Output) -> Result<()> {
//!     output.step("Copying template");
//!     output.result("Branch: main -> feature/x (new)");
//!     Ok(())
//! }
//! ```

mod cli;

pub use cli::CliOutput;
pub use test::{OutputEntry, TestOutput};

/// Flags from the command line that shape terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// `--quiet`: only warnings and errors.
    pub quiet: bool,
    /// `--verbose`: also print steps and debug lines.
    pub verbose: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }
}

/// Sink for everything a command prints.
///
/// Warnings and errors go to stderr and survive `--quiet`; steps and debug
/// lines need `--verbose`.
pub trait Output {
    /// A plain message, such as "Hook already installed".
    fn info(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    fn error(&mut self, msg: &str);

    fn debug(&mut self, msg: &str);

    /// An intermediate filesystem step reported by the core.
    fn step(&mut self, msg: &str);

    /// The line a command exists to print, such as "Initialized: <path>".
    fn result(&mut self, msg: &str);

    /// A `Key: value` row with the keys aligned, as in `status`.
    fn detail(&mut self, key: &str, value: &str);

    /// One indented row of a listing, as in `branches`.
    fn list_item(&mut self, item: &str);
}
