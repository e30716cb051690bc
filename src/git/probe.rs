//! Repository state probing.
//!
//! Three sequential read-only probes per repository: branch, remote,
//! working-tree modifications. Each shells out to git; the repository is
//! never touched.

use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::operations::run_git;
use super::status::{parse_porcelain, Modifications, RepoStatus, SyncState};
use crate::error::{ProbeStage, Result, ScanError};

const GIT_SYMBOLIC_REF_ARGS: &[&str] = &["symbolic-ref", "--quiet", "HEAD"];
const GIT_REV_PARSE_SHORT_ARGS: &[&str] = &["rev-parse", "--short", "HEAD"];
const GIT_REMOTE_VERBOSE_ARGS: &[&str] = &["remote", "-v"];
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain", "-b"];
const GIT_STASH_VERIFY_ARGS: &[&str] = &["rev-parse", "--verify", "refs/stash"];

const HEAD_REF_PREFIX: &str = "refs/heads/";

// Push line of `git remote -v`, e.g. `origin  git@host:repo.git (push)`
static PUSH_REMOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^origin\s+(\S+) \(push\)$").expect("hardcoded pattern"));

/// Probes a repository root and returns its fully populated status.
///
/// Sub-probe failures abort the status computation for this repository
/// with an error naming the failing stage and the tool's diagnostic.
pub async fn probe_repo(path: &Path) -> Result<RepoStatus> {
    debug!("probing {}", path.display());

    let branch = current_branch(path).await?;
    let remote_url = push_remote(path).await?;
    let (sync, mut modifications) = worktree_state(path).await?;

    if has_stash(path).await {
        modifications.stashed = true;
    }

    Ok(RepoStatus {
        path: path.to_path_buf(),
        branch,
        remote_url,
        sync,
        modifications,
    })
}

/// Resolves the checked-out branch, falling back to the short commit id
/// when HEAD is detached.
async fn current_branch(path: &Path) -> Result<String> {
    let by_ref = run_git(path, GIT_SYMBOLIC_REF_ARGS)
        .await
        .map_err(|e| ScanError::probe(path, ProbeStage::Branch, e.to_string()))?;

    if by_ref.success {
        let name = by_ref.stdout.trim();
        return Ok(name.strip_prefix(HEAD_REF_PREFIX).unwrap_or(name).to_string());
    }

    // Detached HEAD
    let by_rev = run_git(path, GIT_REV_PARSE_SHORT_ARGS)
        .await
        .map_err(|e| ScanError::probe(path, ProbeStage::Branch, e.to_string()))?;

    if by_rev.success {
        Ok(by_rev.stdout.trim().to_string())
    } else {
        Err(ScanError::probe(path, ProbeStage::Branch, by_rev.stderr))
    }
}

/// Extracts the push URL of the `origin` remote. A repository without
/// remotes is not an error; the URL is simply empty.
async fn push_remote(path: &Path) -> Result<String> {
    let output = run_git(path, GIT_REMOTE_VERBOSE_ARGS)
        .await
        .map_err(|e| ScanError::probe(path, ProbeStage::Remote, e.to_string()))?;

    if !output.success {
        return Err(ScanError::probe(path, ProbeStage::Remote, output.stderr));
    }

    for line in output.stdout.lines() {
        if let Some(captures) = PUSH_REMOTE_LINE.captures(line) {
            return Ok(captures[1].to_string());
        }
    }

    Ok(String::new())
}

/// Reads sync state and modification flags from the porcelain status.
async fn worktree_state(path: &Path) -> Result<(SyncState, Modifications)> {
    let output = run_git(path, GIT_STATUS_PORCELAIN_ARGS)
        .await
        .map_err(|e| ScanError::probe(path, ProbeStage::Status, e.to_string()))?;

    if !output.success {
        return Err(ScanError::probe(path, ProbeStage::Status, output.stderr));
    }

    Ok(parse_porcelain(&output.stdout))
}

/// Nonzero exit simply means no stash exists.
async fn has_stash(path: &Path) -> bool {
    run_git(path, GIT_STASH_VERIFY_ARGS)
        .await
        .map(|output| output.success)
        .unwrap_or(false)
}
