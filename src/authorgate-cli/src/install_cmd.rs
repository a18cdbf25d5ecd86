//! The `install` command: wire authorgate into git as a pre-commit hook.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use authorgate_utils_git::{get_hooks_dir, is_git_repo};
use tracing::info;

/// Hook file name inside the hooks directory.
pub const HOOK_NAME: &str = "pre-commit";

fn quote(path: &Path) -> Result<String> {
    let text = path.to_string_lossy();
    shlex::try_quote(&text)
        .map(|quoted| quoted.into_owned())
        .with_context(|| format!("Cannot quote path for the hook script: {}", path.display()))
}

/// Contents of the pre-commit hook for `binary`, passing `store` when one
/// was given explicitly.
pub fn hook_script(binary: &Path, store: Option<&Path>) -> Result<String> {
    let mut command = format!("exec {} check", quote(binary)?);
    if let Some(store) = store {
        command.push_str(&format!(" --store {}", quote(store)?));
    }
    Ok(format!(
        "#!/bin/sh\n# Installed by authorgate: confirm the commit author before committing.\n{command}\n"
    ))
}

/// Write `script` to `hook`, refusing to replace an existing file unless
/// `force` is set.
pub fn write_hook(hook: &Path, script: &str, force: bool) -> Result<()> {
    if hook.exists() && !force {
        bail!(
            "{} already exists. Use --force to replace it.",
            hook.display()
        );
    }

    if let Some(parent) = hook.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(hook, script).with_context(|| format!("Failed to write {}", hook.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(hook, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make {} executable", hook.display()))?;
    }

    Ok(())
}

pub fn run_install(cwd: &Path, store: Option<&Path>, force: bool) -> Result<ExitCode> {
    if !is_git_repo(cwd) {
        bail!("{} is not inside a git repository", cwd.display());
    }
    let hooks_dir = get_hooks_dir(cwd).context("Could not determine the git hooks directory")?;
    let binary = std::env::current_exe().context("Could not locate the authorgate executable")?;

    let hook = hooks_dir.join(HOOK_NAME);
    write_hook(&hook, &hook_script(&binary, store)?, force)?;

    info!(hook = %hook.display(), "Installed pre-commit hook");
    println!("Installed pre-commit hook at {}", hook.display());
    Ok(ExitCode::SUCCESS)
}
