//! The `remember` command: configure the remember duration.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Result, bail};
use authorgate_store::{AuthorStore, FileStore, MAX_REMEMBER_MINUTES, format_fixed};
use tracing::info;

/// Store `minutes` as the remember duration, backing the store up first.
pub fn set_remember_minutes(store: &mut dyn AuthorStore, minutes: f64) -> Result<()> {
    if !minutes.is_finite() || minutes < 0.0 {
        bail!("Remember duration must be a non-negative number of minutes");
    }
    if minutes > MAX_REMEMBER_MINUTES {
        bail!("Remember duration cannot exceed {MAX_REMEMBER_MINUTES:.0} minutes");
    }

    let (mut user, authors) = store.load()?;
    user.remember_minutes = minutes;

    store.backup()?;
    store.save(&user, &authors)?;
    info!(minutes, "Updated remember duration");
    Ok(())
}

pub fn run_remember(store_path: &Path, minutes: f64) -> Result<ExitCode> {
    let mut store = FileStore::new(store_path);
    set_remember_minutes(&mut store, minutes)?;

    println!(
        "Commit author will be remembered for {} minutes once confirmed.",
        format_fixed(minutes)
    );
    Ok(ExitCode::SUCCESS)
}
