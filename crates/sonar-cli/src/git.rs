use std::path::Path;
use std::process::Command;

/// Branch checked out in `cwd`, via `git rev-parse --abbrev-ref HEAD`.
///
/// Returns `None` outside a repository, when git is unavailable, or on a
/// detached HEAD.
pub fn current_branch(cwd: &Path) -> Option<String> {
    let branch = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .current_dir(cwd)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "HEAD");

    match &branch {
        Some(name) => tracing::debug!(branch = %name, "detected git branch"),
        None => tracing::debug!(cwd = %cwd.display(), "no git branch detected"),
    }
    branch
}
