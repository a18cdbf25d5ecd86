//! Commit author resolution.
//!
//! Decides, from the persisted [`UserState`](authorgate_store::UserState) and
//! the answers of a [`PromptGateway`], whether a commit may proceed and which
//! identity gets recorded:
//!
//! ```text
//! CHECK_EXPIRY --not expired--> PASS
//!      |
//!   expired
//!      v
//! RESOLVE_IDENTITY --> PERSIST --> COMPARE --> PASS | FAIL
//! ```
//!
//! A changed identity always fails the run that recorded it, so the author
//! sees the new attribution before committing again.
//!
//! # Example
//!
//! ```rust,ignore
//! use authorgate_resolver::Resolver;
//! use authorgate_store::FileStore;
//!
//! let mut store = FileStore::new(".git/config");
//! let mut prompts = MyPrompts::new();
//! let resolution = Resolver::new(&mut store, &mut prompts).resolve()?;
//! std::process::exit(resolution.exit_code().into());
//! ```

pub mod clock;
pub mod identity;
pub mod prompt;
pub mod resolver;


pub use clock::{Clock, FixedClock, SystemClock};
pub use identity::Identity;
pub use prompt::{OTHER_AUTHOR, PromptError, PromptGateway};
pub use resolver::{Resolution, Resolver};

use std::path::PathBuf;

use authorgate_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{} not found. Please create it and commit again.", .0.display())]
    StoreMissing(PathBuf),
    #[error("No commit author selected. Choose or enter a valid author and commit again.")]
    NoAuthorSelected,
    #[error("Author store error: {0}")]
    Store(StoreError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl From<StoreError> for ResolveError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(path) => ResolveError::StoreMissing(path),
            other => ResolveError::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
