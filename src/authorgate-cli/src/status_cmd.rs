//! The `status` command: a read-only view of the author store.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use authorgate_resolver::{Clock, Identity, SystemClock};
use authorgate_store::{AuthorRoster, AuthorStore, FileStore, UserState};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Everything `status` reports.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub store: PathBuf,
    pub author: Option<Identity>,
    pub expires: Option<f64>,
    pub expired: bool,
    pub remaining_secs: Option<f64>,
    pub remember_minutes: f64,
    pub authors: AuthorRoster,
}

impl StatusReport {
    pub fn new(store: &Path, user: UserState, authors: AuthorRoster, now: f64) -> Self {
        let expired = user.is_expired(now);
        let author = user
            .name
            .as_deref()
            .map(|name| Identity::from_parts(Some(name), user.email.as_deref()));

        Self {
            store: store.to_path_buf(),
            author,
            expires: user.expires,
            expired,
            remaining_secs: (!expired).then(|| user.expires_at() - now),
            remember_minutes: user.remember_minutes,
            authors,
        }
    }

    /// Human-readable report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Store:    {}\n", self.store.display()));

        let author = self
            .author
            .as_ref()
            .map_or_else(|| "(none)".to_string(), Identity::to_string);
        out.push_str(&format!("Author:   {author}\n"));

        let expiry = match (self.expires, self.remaining_secs) {
            (Some(expires), Some(remaining)) => format!(
                "{} (in {})",
                format_timestamp(expires),
                format_remaining(remaining)
            ),
            (Some(expires), None) => format!("{} (expired)", format_timestamp(expires)),
            (None, _) => "expired".to_string(),
        };
        out.push_str(&format!("Expires:  {expiry}\n"));
        out.push_str(&format!(
            "Remember: {:.1} minutes\n",
            self.remember_minutes
        ));

        out.push_str(&format!("Authors:  {}\n", self.authors.len()));
        for (name, email) in self.authors.iter() {
            out.push_str(&format!("  {}\n", Identity::new(name, email)));
        }
        out
    }
}

/// Local wall-clock time for a Unix timestamp.
fn format_timestamp(timestamp: f64) -> String {
    let secs = timestamp.trunc() as i64;
    let nanos = (timestamp.fract() * 1e9) as u32;
    DateTime::from_timestamp(secs, nanos)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| format!("{timestamp:.1}"))
}

/// Remaining time rounded to whole seconds.
fn format_remaining(secs: f64) -> String {
    let Ok(duration) = Duration::try_from_secs_f64(secs.max(0.0)) else {
        return format!("{secs:.0}s");
    };
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

pub fn run_status(store_path: &Path, json: bool) -> Result<ExitCode> {
    let mut store = FileStore::new(store_path);
    let (user, authors) = store.load()?;
    let report = StatusReport::new(store_path, user, authors, SystemClock.now());

    if json {
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize status")?;
        println!("{text}");
    } else {
        print!("{}", report.render());
    }
    Ok(ExitCode::SUCCESS)
}
