//! Command-line argument definitions.

use std::path::{Path, PathBuf};

use authorgate_store::MAX_REMEMBER_MINUTES;
use clap::{Args, Parser, Subcommand};

/// Store used when neither `--store` nor `AUTHORGATE_STORE` is given.
pub const DEFAULT_STORE_PATH: &str = ".git/config";

/// Log level for tracing output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// authorgate - confirm the commit author before every commit.
///
/// Without a subcommand, runs `check`, which is what the pre-commit hook calls.
#[derive(Parser, Debug)]
#[command(name = "authorgate")]
#[command(author, version)]
#[command(about = "Confirm the commit author before every commit", long_about = None)]
pub struct Cli {
    /// Author store file
    #[arg(long, global = true, env = "AUTHORGATE_STORE", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Log level for diagnostics written to stderr
    #[arg(long = "log-level", global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Store path after applying the default.
    pub fn store_path(&self) -> &Path {
        self.store
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STORE_PATH))
    }

    /// Effective log level: `--verbose`, then `AUTHORGATE_LOG_LEVEL`, then
    /// `--log-level`.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else if let Some(level) = std::env::var("AUTHORGATE_LOG_LEVEL")
            .ok()
            .and_then(|value| LogLevel::from_str_loose(&value))
        {
            level
        } else {
            self.log_level
        }
    }
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the commit author and decide whether the commit may proceed
    Check,

    /// Show the remembered author, its expiry and the known authors
    Status(StatusArgs),

    /// Set how long a confirmed author is remembered
    Remember(RememberArgs),

    /// Install the pre-commit hook into the current repository
    Install(InstallArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RememberArgs {
    /// Minutes to remember a confirmed author for
    #[arg(value_parser = parse_minutes)]
    pub minutes: f64,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Replace an existing pre-commit hook
    #[arg(long)]
    pub force: bool,
}

fn parse_minutes(value: &str) -> Result<f64, String> {
    let minutes: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number of minutes"))?;
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(format!("'{value}' must be a non-negative number of minutes"));
    }
    if minutes > MAX_REMEMBER_MINUTES {
        return Err(format!(
            "'{value}' exceeds the maximum of {MAX_REMEMBER_MINUTES:.0} minutes"
        ));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::try_parse_from(["authorgate"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_global_store_after_subcommand() {
        let cli = Cli::try_parse_from(["authorgate", "status", "--store", "custom.ini"]).unwrap();
        assert_eq!(cli.store_path(), Path::new("custom.ini"));
        assert!(matches!(cli.command, Some(Commands::Status(StatusArgs { json: false }))));
    }

    #[test]
    fn test_remember_rejects_negative_minutes() {
        assert!(Cli::try_parse_from(["authorgate", "remember", "--", "-5"]).is_err());
        assert!(Cli::try_parse_from(["authorgate", "remember", "soon"]).is_err());
        assert!(Cli::try_parse_from(["authorgate", "remember", "1e18"]).is_err());
        assert!(Cli::try_parse_from(["authorgate", "remember", "1e9"]).is_ok());

        let cli = Cli::try_parse_from(["authorgate", "remember", "2.5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Remember(RememberArgs { minutes })) if minutes == 2.5
        ));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_loose("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str_loose("Trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_str_loose("loud"), None);
    }
}
