//! Scan pipeline coordination.
//!
//! One blocking traversal task feeds repository roots into a bounded
//! channel; the consumer loop below drains it, fanning each probe out as
//! its own task under a semaphore bound and fanning results back in.
//! Emission happens only inside this loop, so concurrent probes can
//! never interleave partial lines. The loop terminates once the channel
//! is closed and every dispatched probe has been joined.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use log::warn;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;

use super::config::{get_git_concurrency, QUEUE_CAPACITY};
use super::discovery;
use crate::error::Result;
use crate::filter::{self, Combine};
use crate::git::probe_repo;
use crate::render::Template;

/// Everything the scan needs besides the root path
pub struct ScanOptions {
    pub filters: Vec<String>,
    pub combine: Combine,
    pub search: String,
    pub template: Template,
    pub jobs: Option<usize>,
    pub sequential: bool,
}

/// Tallies for exit-code and summary reporting
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanStats {
    /// Repositories discovered by the traverser
    pub repos: usize,
    /// Lines written (passed both filter and search)
    pub emitted: usize,
    /// Repositories whose probe failed and was skipped
    pub failures: usize,
}

/// Scans `root` and writes one rendered line per matching repository.
///
/// Probe failures are isolated: logged, counted, and skipped, so one
/// unreadable repository cannot suppress the report for the rest.
/// Traversal failures abort the scan.
pub async fn run_scan<W: Write>(
    root: PathBuf,
    options: ScanOptions,
    out: &mut W,
) -> Result<ScanStats> {
    let (tx, mut rx) = mpsc::channel::<PathBuf>(QUEUE_CAPACITY);

    // blocking_send provides the backpressure: the walk stalls while the
    // queue is full. A send error means the consumer is gone, which ends
    // the walk early.
    let traversal: JoinHandle<Result<()>> = tokio::task::spawn_blocking(move || {
        discovery::traverse(&root, |path| tx.blocking_send(path).is_ok())
    });

    let limit = get_git_concurrency(options.jobs, options.sequential);
    let semaphore = Arc::new(Semaphore::new(limit));
    let options = Arc::new(options);

    let mut inflight: FuturesUnordered<JoinHandle<Result<Option<String>>>> =
        FuturesUnordered::new();
    let mut stats = ScanStats::default();
    let mut receiving = true;

    loop {
        tokio::select! {
            received = rx.recv(), if receiving => match received {
                Some(path) => {
                    stats.repos += 1;
                    let permit = Arc::clone(&semaphore)
                        .acquire_owned()
                        .await
                        .expect("probe semaphore closed unexpectedly");
                    let options = Arc::clone(&options);
                    inflight.push(tokio::spawn(async move {
                        let _permit = permit;
                        report_repo(path, &options).await
                    }));
                }
                None => receiving = false,
            },
            Some(joined) = inflight.next(), if !inflight.is_empty() => {
                match joined.expect("probe task panicked") {
                    Ok(Some(line)) => {
                        stats.emitted += 1;
                        writeln!(out, "{line}")?;
                    }
                    Ok(None) => {}
                    Err(err) => {
                        stats.failures += 1;
                        warn!("{err}");
                    }
                }
            },
            else => break,
        }
    }

    traversal.await.expect("traversal task panicked")?;

    Ok(stats)
}

/// Probes one repository and renders its line, or `None` when the
/// filter or search predicate rejects it.
async fn report_repo(path: PathBuf, options: &ScanOptions) -> Result<Option<String>> {
    let status = probe_repo(&path).await?;

    if !filter::matches(&status, &options.filters, options.combine) {
        return Ok(None);
    }

    let line = options.template.render(&status);
    if !line.contains(&options.search) {
        return Ok(None);
    }

    Ok(Some(line))
}
