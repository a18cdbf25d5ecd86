//! authorgate CLI library module.
//!
//! - `cli/` - argument parsing and command dispatch
//! - `prompts` - terminal prompt gateway
//! - `logging` - tracing subscriber setup
//! - `*_cmd.rs` - individual command implementations

pub mod check_cmd;
pub mod cli;
pub mod install_cmd;
pub mod logging;
pub mod prompts;
pub mod remember_cmd;
pub mod status_cmd;
