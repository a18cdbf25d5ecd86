//! CLI argument parsing and command dispatch.
//!
//! - `args` - Command-line argument structures
//! - `handlers` - Command execution handlers

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, DEFAULT_STORE_PATH, LogLevel};
pub use handlers::dispatch_command;
