//! authorgate - main entry point.
//!
//! Exit status is the contract with git: `0` lets the commit proceed, `1`
//! blocks it. Errors are printed once, on stderr.

use std::process::ExitCode;

use clap::Parser;

use authorgate_cli::cli::{Cli, dispatch_command};
use authorgate_cli::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.effective_log_level());

    match dispatch_command(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
