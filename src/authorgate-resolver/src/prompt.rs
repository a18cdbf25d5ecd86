//! Interactive capabilities the resolver needs from its host.
//!
//! Dismissing a prompt is an ordinary answer (`None` or `false`), not an
//! error. [`PromptError`] is reserved for a prompt that could not be shown
//! at all, e.g. when no terminal is attached.

use crate::identity::Identity;

/// Entry appended to the roster list that asks for manual entry instead.
pub const OTHER_AUTHOR: &str = "Other";

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Cannot prompt for commit author: {0}")]
    Unavailable(String),
}

pub trait PromptGateway {
    /// Pick one of `options`, starting on `default`. `None` when dismissed.
    fn choose(&mut self, options: &[String], default: &str) -> Result<Option<String>, PromptError>;

    /// Ask for a name and email. `None` when dismissed.
    fn enter_manually(&mut self) -> Result<Option<Identity>, PromptError>;

    /// Ask whether to remember the author for `minutes`.
    fn confirm_remember(&mut self, minutes: f64) -> Result<bool, PromptError>;
}
