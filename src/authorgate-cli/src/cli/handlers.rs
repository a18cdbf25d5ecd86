//! Command dispatch.

use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::check_cmd::run_check;
use crate::cli::args::{Cli, Commands};
use crate::install_cmd::run_install;
use crate::remember_cmd::run_remember;
use crate::status_cmd::run_status;

/// Run the selected command. `check` is the default.
pub fn dispatch_command(cli: Cli) -> Result<ExitCode> {
    let store = cli.store_path().to_path_buf();

    match cli.command {
        None | Some(Commands::Check) => run_check(&store),
        Some(Commands::Status(args)) => run_status(&store, args.json),
        Some(Commands::Remember(args)) => run_remember(&store, args.minutes),
        Some(Commands::Install(args)) => {
            let cwd = std::env::current_dir().context("Failed to read the current directory")?;
            run_install(&cwd, cli.store.as_deref(), args.force)
        }
    }
}
