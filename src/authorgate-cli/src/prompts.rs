//! Terminal prompts for choosing the commit author.
//!
//! Prompts render on stderr so the hook's stdout stays reserved for its
//! one-line result. Without a terminal every prompt fails with
//! [`PromptError::Unavailable`].

use authorgate_resolver::{Identity, PromptError, PromptGateway};
use authorgate_store::format_fixed;
use dialoguer::{Confirm, Input, Select};
use tracing::debug;

fn unavailable(err: dialoguer::Error) -> PromptError {
    PromptError::Unavailable(err.to_string())
}

/// Index of `default` in `options`, falling back to the first entry.
pub fn default_index(options: &[String], default: &str) -> usize {
    options
        .iter()
        .position(|option| option == default)
        .unwrap_or(0)
}

fn read_field(prompt: &str) -> Result<String, PromptError> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(unavailable)?;
    Ok(value.trim().to_string())
}

/// Prompt gateway backed by the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompts;

impl TerminalPrompts {
    pub fn new() -> Self {
        Self
    }
}

impl PromptGateway for TerminalPrompts {
    fn choose(&mut self, options: &[String], default: &str) -> Result<Option<String>, PromptError> {
        let selection = Select::new()
            .with_prompt("Git commit author")
            .items(options)
            .default(default_index(options, default))
            .interact_opt()
            .map_err(unavailable)?;

        debug!(?selection, "Author list answered");
        Ok(selection.and_then(|idx| options.get(idx).cloned()))
    }

    fn enter_manually(&mut self) -> Result<Option<Identity>, PromptError> {
        eprintln!("Enter commit author details (leave the name empty to cancel)");

        let name = read_field("Full name")?;
        if name.is_empty() {
            return Ok(None);
        }
        let email = read_field("Email address")?;

        Ok(Some(Identity::new(name, email)))
    }

    fn confirm_remember(&mut self, minutes: f64) -> Result<bool, PromptError> {
        let answer = Confirm::new()
            .with_prompt(format!(
                "Remember commit author for {} minutes?",
                format_fixed(minutes)
            ))
            .default(false)
            .interact_opt()
            .map_err(unavailable)?;

        Ok(answer.unwrap_or(false))
    }
}
