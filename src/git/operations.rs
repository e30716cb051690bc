//! Git subprocess execution.

use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

// Probes are local-only; anything slower than this is a wedged repository.
const GIT_PROBE_TIMEOUT_SECS: u64 = 60;

/// Captured output of one git invocation.
///
/// `stdout` is kept verbatim: porcelain status lines are positional and
/// leading spaces in the two-character codes are significant.
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a git command with the working directory set to the repository
/// root, capturing stdout and stderr. Only failure to start or a timeout
/// is an `Err`; a nonzero exit is reported through `GitOutput::success`.
pub async fn run_git(path: &Path, args: &[&str]) -> io::Result<GitOutput> {
    let timeout_duration = Duration::from_secs(GIT_PROBE_TIMEOUT_SECS);

    let result = tokio::time::timeout(
        timeout_duration,
        Command::new("git").args(args).current_dir(path).output(),
    )
    .await;

    match result {
        Ok(Ok(output)) => Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("git operation timed out after {GIT_PROBE_TIMEOUT_SECS} seconds"),
        )),
    }
}
