//! Persisted author state for authorgate.
//!
//! The store lives inside an INI-like file (normally `.git/config`) and owns
//! two sections:
//! - `[user]` - the resolved identity, its expiry and the remember duration
//! - `[authors]` - the roster of previously seen authors (name -> email)
//!
//! Everything else in the backing file is kept as-is when the store writes.
//!
//! # Example
//!
//! ```rust,ignore
//! use authorgate_store::{AuthorStore, FileStore};
//!
//! let mut store = FileStore::new(".git/config");
//! let (mut user, authors) = store.load()?;
//! user.remember_minutes = 15.0;
//! store.backup()?;
//! store.save(&user, &authors)?;
//! ```

pub mod backup;
pub mod ini;
pub mod state;
pub mod store;

pub use backup::{BACKUP_SUFFIX, backup_path, write_backup};
pub use ini::{IniDocument, is_storable_key};
pub use state::{
    AUTHORS_SECTION, AuthorRoster, DEFAULT_REMEMBER_MINUTES, MAX_REMEMBER_MINUTES, USER_SECTION,
    UserState, format_fixed, parse_fixed,
};
pub use store::{AuthorStore, FileStore, MemoryStore};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{} not found", .0.display())]
    Missing(PathBuf),
    #[error("line {line}: entry outside of any section: {content}")]
    Malformed { line: usize, content: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
