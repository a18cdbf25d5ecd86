//! Backup writer for the store file.
//!
//! The backup is a plain copy next to the store and is overwritten on every
//! mutating run, so only the most recent prior state is recoverable.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Result, StoreError};

/// Suffix appended to the store file name.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Sibling backup path for `path`, e.g. `.git/config` -> `.git/config.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Copy `path` to its backup path and return the backup location.
pub fn write_backup(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(StoreError::Missing(path.to_path_buf()));
    }

    let target = backup_path(path);
    fs::copy(path, &target)?;
    debug!("Backed up {} to {}", path.display(), target.display());
    Ok(target)
}
