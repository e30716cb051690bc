//! Repository discovery.
//!
//! One blocking pass over the directory tree. A directory is a
//! repository root iff it directly contains a `.git` entry; the parent
//! is emitted and the `.git` directory itself is never descended into.

use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use super::config::SKIP_DIRECTORIES;
use crate::error::Result;

/// Check if a .git file (for submodules/worktrees) contains a gitdir
/// reference. Only reads the first few lines; gitdir is typically first.
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => BufReader::new(file)
            .lines()
            .take(5)
            .filter_map(std::result::Result::ok)
            .any(|line| line.trim_start().starts_with("gitdir:")),
        Err(_) => false,
    }
}

/// Walks the tree below `root`, calling `emit` with each repository root
/// in discovery order. `emit` returning false stops the walk early (the
/// consumer has gone away).
///
/// Traversal is single-pass and not restartable; an unreadable path is a
/// hard failure that aborts the whole walk.
pub fn traverse<F>(root: &Path, mut emit: F) -> Result<()>
where
    F: FnMut(PathBuf) -> bool,
{
    // Physical repos reached through more than one symlink count once
    let mut seen = HashSet::new();

    let mut walker = WalkDir::new(root).follow_links(true).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry?;
        let file_name = entry.file_name();

        if entry.file_type().is_dir()
            && file_name.to_str().is_some_and(|n| SKIP_DIRECTORIES.contains(&n))
        {
            walker.skip_current_dir();
            continue;
        }

        if file_name != ".git" {
            continue;
        }

        let is_repo = if entry.file_type().is_dir() {
            // No further repos live inside .git; skip the whole subtree
            walker.skip_current_dir();
            true
        } else {
            // Submodules and worktrees expose a .git file
            is_git_file(entry.path())
        };

        if !is_repo {
            continue;
        }

        let Some(parent) = entry.path().parent() else {
            continue;
        };

        let canonical = parent.canonicalize().unwrap_or_else(|_| parent.to_path_buf());
        if !seen.insert(canonical) {
            continue;
        }

        debug!("discovered repository {}", parent.display());
        if !emit(parent.to_path_buf()) {
            return Ok(());
        }
    }

    Ok(())
}

/// Collects every repository root below `root` into a vector.
///
/// Convenience wrapper around [`traverse`] for callers that do not need
/// streaming delivery.
pub fn find_repos(root: &Path) -> Result<Vec<PathBuf>> {
    let mut repos = Vec::new();
    traverse(root, |path| {
        repos.push(path);
        true
    })?;
    Ok(repos)
}
