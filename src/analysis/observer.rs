//! Analysis results and observer dispatch

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam::utils::CachePadded;
use tracing::trace;

/// One published luminance measurement. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Mean luminance of the frame, in [0, 255]
    pub mean_luma: f64,
    /// Arrival timestamp of the analyzed frame (monotonic milliseconds)
    pub computed_at_ms: u64,
}

/// Observer callback invoked synchronously for every published result.
///
/// Observers must return quickly; a slow consumer should sit behind
/// [`result_sink`] instead so it cannot stall frame acquisition.
pub type LumaObserver = Arc<dyn Fn(&AnalysisResult) + Send + Sync>;

#[derive(Default)]
struct SinkStats {
    forwarded: AtomicUsize,
    dropped: AtomicUsize,
}

/// Receiving end of a [`result_sink`] observer.
pub struct ResultSink {
    rx: flume::Receiver<AnalysisResult>,
    stats: Arc<CachePadded<SinkStats>>,
}

impl ResultSink {
    /// Await the next forwarded result. Errors once the observer side
    /// has been dropped and the queue is drained.
    pub async fn recv_async(&self) -> Result<AnalysisResult, flume::RecvError> {
        self.rx.recv_async().await
    }

    pub fn try_recv(&self) -> Option<AnalysisResult> {
        self.rx.try_recv().ok()
    }

    /// (forwarded, dropped) counts since creation.
    pub fn stats(&self) -> (usize, usize) {
        (
            self.stats.forwarded.load(Ordering::Relaxed),
            self.stats.dropped.load(Ordering::Relaxed),
        )
    }
}

/// Build an observer that hands results to a separate consumer without
/// ever blocking the analyzer: results go into a bounded queue via
/// `try_send`, and when the queue is full the result is dropped and
/// counted rather than waited on.
pub fn result_sink(capacity: usize) -> (LumaObserver, ResultSink) {
    let (tx, rx) = flume::bounded::<AnalysisResult>(capacity);
    let stats: Arc<CachePadded<SinkStats>> = Arc::new(CachePadded::new(SinkStats::default()));

    let observer_stats = Arc::clone(&stats);
    let observer: LumaObserver = Arc::new(move |result: &AnalysisResult| {
        match tx.try_send(result.clone()) {
            Ok(()) => {
                observer_stats.forwarded.fetch_add(1, Ordering::Relaxed);
            }
            Err(flume::TrySendError::Full(_)) => {
                observer_stats.dropped.fetch_add(1, Ordering::Relaxed);
                trace!("Result queue full, dropping measurement");
            }
            Err(flume::TrySendError::Disconnected(_)) => {
                observer_stats.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    });

    (observer, ResultSink { rx, stats })
}
