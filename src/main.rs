/// omnicontext - Git branch context manager
///
/// Parses the command line, sets up logging and output, and dispatches to
/// the subcommand. Every handled error prints `error: <message>` and exits 1.
use clap::error::ErrorKind;
use clap::Parser;
use omnicontext::git::GitCommand;
use omnicontext::logging::init_logging;
use omnicontext::output::{CliOutput, Output, OutputConfig};
use std::process::ExitCode;

mod commands;

use commands::{Cli, CommandContext};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logging(cli.verbose);

    let mut output = CliOutput::new(OutputConfig::new(cli.quiet, cli.verbose));
    let git = GitCommand::new();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            output.error(&format!("cannot read current directory: {e}"));
            return ExitCode::FAILURE;
        }
    };
    let ctx = CommandContext::new(cwd, &git);

    match commands::run(cli.command, &ctx, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            output.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
