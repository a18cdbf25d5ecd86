//! Tracing setup. Diagnostics always go to stderr.

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Filter directives for `level`, or `RUST_LOG` when it is set.
fn build_filter(level: LogLevel) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.as_filter_str())
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
