//! Git testing utilities

use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Runs a git command in `path`, returning (success, stdout)
pub fn git(path: &Path, args: &[&str]) -> Result<(bool, String)> {
    let output = Command::new("git").args(args).current_dir(path).output()?;
    Ok((
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
    ))
}

/// Sets up a git repository with user config and a deterministic branch
/// name. Returns Ok(()) on success, or bails if git is not available.
pub fn setup_git_repo(path: &Path) -> Result<()> {
    let (ok, _) = git(path, &["init"])?;
    if !ok {
        anyhow::bail!("Git not available - skipping test");
    }

    // Deterministic branch name regardless of init.defaultBranch
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;

    Ok(())
}

/// Creates a test commit in the repository
pub fn create_test_commit(
    path: &Path,
    file_name: &str,
    content: &str,
    message: &str,
) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;

    git(path, &["add", file_name])?;

    let (ok, _) = git(path, &["commit", "-m", message])?;
    if !ok {
        anyhow::bail!("Failed to create commit in {}", path.display());
    }

    Ok(())
}

/// Adds a git remote to a repository
#[allow(dead_code)]
pub fn add_git_remote(path: &Path, remote_name: &str, url: &str) -> Result<()> {
    let (ok, _) = git(path, &["remote", "add", remote_name, url])?;
    if !ok {
        anyhow::bail!("Failed to add remote {remote_name}");
    }
    Ok(())
}

/// Creates a bare repository usable as a local push target and wires it
/// up as `origin` with the current branch tracking it.
#[allow(dead_code)]
pub fn attach_bare_origin(repo: &Path, bare: &Path) -> Result<()> {
    let (ok, _) = git(bare, &["init", "--bare"])?;
    if !ok {
        anyhow::bail!("Failed to init bare repository");
    }

    add_git_remote(repo, "origin", &bare.to_string_lossy())?;

    let (ok, _) = git(repo, &["push", "-u", "origin", "main"])?;
    if !ok {
        anyhow::bail!("Failed to push to bare origin");
    }

    Ok(())
}

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
