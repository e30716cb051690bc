//! Configuration constants and settings

// Capacity of the path queue between the traversal task and the probe
// dispatcher. A soft backpressure bound: the traverser blocks when the
// probes fall behind.
pub const QUEUE_CAPACITY: usize = 10;

// Concurrency cap for simultaneous git probes. Probes are I/O-bound
// (subprocess exit + stdout collection), so a few more than the core
// count saturates the disk without swamping the process table.
pub const GIT_CONCURRENT_CAP: usize = 12;

/// Determines the number of concurrent git probes.
///
/// Priority order:
/// 1. --sequential flag → 1
/// 2. --jobs N flag → N
/// 3. Smart default → min(CPU_CORES + 2, 12)
pub fn get_git_concurrency(jobs: Option<usize>, sequential: bool) -> usize {
    if sequential {
        return 1;
    }

    if let Some(n) = jobs {
        return n.max(1);
    }

    (num_cpus::get() + 2).min(GIT_CONCURRENT_CAP)
}

// Directories to skip during repository search
pub const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "build",
    ".next",
    "dist",
    "__pycache__",
    ".venv",
    "venv",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_wins_over_jobs() {
        assert_eq!(get_git_concurrency(Some(8), true), 1);
    }

    #[test]
    fn test_explicit_jobs() {
        assert_eq!(get_git_concurrency(Some(4), false), 4);
        // Zero is clamped to a working minimum
        assert_eq!(get_git_concurrency(Some(0), false), 1);
    }

    #[test]
    fn test_default_is_bounded() {
        let n = get_git_concurrency(None, false);
        assert!(n >= 1);
        assert!(n <= GIT_CONCURRENT_CAP);
    }
}
