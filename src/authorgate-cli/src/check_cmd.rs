//! The `check` command run by the pre-commit hook.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use authorgate_resolver::{Resolution, Resolver};
use authorgate_store::FileStore;

use crate::prompts::TerminalPrompts;

/// Resolve the commit author against the store at `store_path`.
pub fn run_check(store_path: &Path) -> Result<ExitCode> {
    let mut store = FileStore::new(store_path);
    let mut prompts = TerminalPrompts::new();

    let resolution = Resolver::new(&mut store, &mut prompts).resolve()?;
    Ok(report(&resolution))
}

/// Message for a finished resolution and whether it belongs on stderr.
pub fn describe(resolution: &Resolution) -> (String, bool) {
    match resolution {
        Resolution::NotExpired => ("Commit author has not expired.".to_string(), false),
        Resolution::Unchanged(_) => ("Commit author has not changed.".to_string(), false),
        Resolution::Changed { current, .. } => (
            format!("Commit author changed to {current}. Please commit again."),
            true,
        ),
    }
}

fn report(resolution: &Resolution) -> ExitCode {
    match describe(resolution) {
        (message, true) => eprintln!("{message}"),
        (message, false) => println!("{message}"),
    }
    ExitCode::from(resolution.exit_code())
}
