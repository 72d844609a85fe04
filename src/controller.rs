//! Scan orchestration
//!
//! One scan runs on two execution contexts: a worker thread performs the
//! full-text pass (segment, match, accumulate), while the coordinator, the
//! thread that called [`ScanController::scan`], owns all scan state, fires
//! the periodic snapshot tick, and delivers every callback. The worker hands
//! its materialized result back over a bounded channel; the only state
//! shared across the boundary is the atomic cancel flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{bounded, tick};
use crossbeam::select;
use thiserror::Error;

use crate::aggregate;
use crate::collector;
use crate::measure::{CompileMeasure, RawMeasure};
use crate::parser;
use crate::workspace::LogSource;

/// Default cadence for incremental result snapshots
pub const DEFAULT_SNAPSHOT_INTERVAL: Duration = Duration::from_secs(1);

/// Cooperative cancellation flag for an in-flight scan
///
/// Settable from any thread at any time; the scan polls it after each
/// matched line, so cancellation stops the pass at the next checkpoint
/// rather than immediately. Completion is observed only via the final
/// callback.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the current scan stop at its next checkpoint
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

/// One delivery of ranked results to the scan's consumer
///
/// `results` is always sorted by time descending; later updates supersede
/// earlier ones, so consumers should replace displayed state, not merge.
/// Exactly one update per scan has `did_complete = true`, and it is always
/// the last one.
#[derive(Debug, Clone)]
pub struct ScanUpdate {
    pub results: Vec<CompileMeasure>,
    pub did_complete: bool,
}

/// Controller-surface errors; the parsing pipeline itself never errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// A scan was requested while one is already in progress
    #[error("a scan is already in progress on this controller")]
    ScanInProgress,
}

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Cadence of incremental snapshot deliveries while scanning
    pub snapshot_interval: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
        }
    }
}

/// Per-run working state, owned exclusively by the controller
#[derive(Debug, Default)]
struct ScanState {
    unprocessed: Vec<RawMeasure>,
    in_progress: bool,
}

/// Drives one end-to-end scan: full-text pass on a worker thread, periodic
/// ranked snapshots to a caller-supplied callback, and a final completion
/// delivery
#[derive(Debug, Default)]
pub struct ScanController {
    state: ScanState,
    cancel: CancelToken,
    options: ScanOptions,
}

impl ScanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ScanOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Handle for cancelling this controller's scans from any thread
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run one scan against `source`, streaming updates to `on_update`
    ///
    /// If the source reports no text, a single empty complete update is
    /// delivered immediately. Otherwise updates arrive on the snapshot
    /// cadence with `did_complete = false` (an empty list means "no timings
    /// found yet", not an error) until the pass finishes, normally or via
    /// cancellation, and the final update arrives with
    /// `did_complete = true`. All callbacks run on the calling thread.
    pub fn scan<S, F>(&mut self, source: &S, mut on_update: F) -> Result<(), ScanError>
    where
        S: LogSource + ?Sized,
        F: FnMut(ScanUpdate),
    {
        if self.state.in_progress {
            return Err(ScanError::ScanInProgress);
        }

        let Some(text) = source.log_text() else {
            on_update(ScanUpdate {
                results: Vec::new(),
                did_complete: true,
            });
            return Ok(());
        };

        self.state.in_progress = true;
        self.state.unprocessed.clear();
        self.cancel.reset();
        tracing::debug!(bytes = text.len(), "scan started");

        let cancel = self.cancel.clone();
        let (done_tx, done_rx) = bounded::<Vec<RawMeasure>>(1);
        let worker = thread::spawn(move || {
            let collected = collector::collect(&text, &cancel);
            // The coordinator holds the receiver until the pass is done; a
            // failed send means there is nobody left to report to.
            let _ = done_tx.send(collected);
        });

        // Creating the ticker is the "start" notification; dropping it when
        // the pass finishes stops periodic snapshots the instant the scan is
        // over. Tick handling is synchronous here, so snapshot computation
        // for this scan can never overlap itself.
        let ticker = tick(self.options.snapshot_interval);
        loop {
            select! {
                recv(ticker) -> _ => {
                    on_update(ScanUpdate {
                        results: snapshot(&self.state.unprocessed),
                        did_complete: false,
                    });
                }
                recv(done_rx) -> collected => {
                    self.state.unprocessed = collected.unwrap_or_default();
                    break;
                }
            }
        }
        drop(ticker);
        let _ = worker.join();

        let results = snapshot(&self.state.unprocessed);
        tracing::debug!(entries = results.len(), "scan finished");
        on_update(ScanUpdate {
            results,
            did_complete: true,
        });

        self.state.unprocessed.clear();
        self.cancel.reset();
        self.state.in_progress = false;
        Ok(())
    }
}

/// Compute one ranked snapshot: parse, group by source line, sort by cost
fn snapshot(unprocessed: &[RawMeasure]) -> Vec<CompileMeasure> {
    let mut results = aggregate::group_by_location(parser::parse_measures(unprocessed));
    aggregate::rank(&mut results);
    results
}
