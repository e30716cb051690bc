pub(crate) mod config;
pub mod discovery;
pub mod pipeline;

// Re-export key items at module level for convenience
pub use config::get_git_concurrency;
pub use discovery::find_repos;
pub use pipeline::{run_scan, ScanOptions, ScanStats};
