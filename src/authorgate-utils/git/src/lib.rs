//! Git utilities for authorgate.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

/// Default timeout for git operations in seconds
const DEFAULT_GIT_TIMEOUT_SECS: u64 = 30;

/// Get the configured git timeout duration
fn get_git_timeout() -> Duration {
    std::env::var("AUTHORGATE_GIT_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(DEFAULT_GIT_TIMEOUT_SECS))
}

/// Execute a git command, killing it once `timeout` has elapsed.
fn run_git_command_with_timeout(mut command: Command, timeout: Duration) -> Option<Output> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .ok()?;

    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(_status)) => {
                return child.wait_with_output().ok();
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    debug!("git timed out after {:?}", timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            Err(_) => {
                return None;
            }
        }
    }
}

/// Run `git <args>` in `cwd` and return trimmed stdout on success.
fn git_stdout(args: &[&str], cwd: &Path) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(cwd);
    let output = run_git_command_with_timeout(cmd, get_git_timeout())?;

    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}

/// Resolve a path printed by git relative to the directory it ran in.
fn absolutize(cwd: &Path, printed: String) -> PathBuf {
    let path = PathBuf::from(printed);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Check if a path is inside a git repository.
pub fn is_git_repo(path: &Path) -> bool {
    git_stdout(&["rev-parse", "--git-dir"], path).is_some()
}

/// Get the directory git runs hooks from.
pub fn get_hooks_dir(cwd: &Path) -> Option<PathBuf> {
    git_stdout(&["rev-parse", "--git-path", "hooks"], cwd).map(|dir| absolutize(cwd, dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absolutize_relative_output() {
        let cwd = Path::new("/work/repo");
        assert_eq!(
            absolutize(cwd, ".git/hooks".to_string()),
            PathBuf::from("/work/repo/.git/hooks")
        );
        assert_eq!(
            absolutize(cwd, "/elsewhere/hooks".to_string()),
            PathBuf::from("/elsewhere/hooks")
        );
    }

    #[test]
    fn test_plain_directory_is_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        let ceiling = temp_dir.path().parent().unwrap();
        // Keep git from walking up into an enclosing repository.
        let mut cmd = Command::new("git");
        cmd.args(["rev-parse", "--git-dir"])
            .current_dir(temp_dir.path())
            .env("GIT_CEILING_DIRECTORIES", ceiling);
        let output = run_git_command_with_timeout(cmd, Duration::from_secs(10));

        assert!(!matches!(output, Some(o) if o.status.success()));
    }
}
