//! Per-frame luminance analysis with throttled publication

use tracing::trace;

use crate::analysis::observer::{AnalysisResult, LumaObserver};
use crate::analysis::rate::RateWindow;
use crate::AnalyzerConfig;

/// Borrowed view of one camera frame's luminance plane.
///
/// The buffer is only valid for the duration of one [`LumaAnalyzer::analyze`]
/// call; the lifetime enforces that the analyzer cannot retain it.
#[derive(Clone, Copy)]
pub struct LumaFrame<'a> {
    /// Single-plane luminance data, one byte per sample (0-255)
    pub plane: &'a [u8],
    /// Arrival timestamp in monotonic milliseconds
    pub timestamp_ms: u64,
}

/// Converts a high-rate frame stream into a low-rate stream of mean
/// luminance measurements plus a continuously updated fps estimate.
///
/// `analyze` never blocks and never fails: degenerate input is skipped
/// under a documented policy so an analyzer fault can never destabilize
/// the upstream acquisition pipeline. The analyzer holds no process-wide
/// state; independent instances do not interfere.
///
/// Frames must be delivered sequentially. `analyze` takes `&mut self` so
/// the borrow checker rejects concurrent delivery; callers that hop
/// delivery threads between frames wrap the analyzer in a `Mutex`, which
/// also provides the cross-thread memory barrier.
pub struct LumaAnalyzer {
    rate: RateWindow,
    throttle_ms: u64,
    /// Timestamp of the last published result; `None` until the first
    /// one, so the first admitted frame always publishes.
    last_analyzed_ms: Option<u64>,
    observers: Vec<LumaObserver>,
}

impl LumaAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            rate: RateWindow::new(config.frame_rate_window),
            throttle_ms: config.throttle_ms,
            last_analyzed_ms: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer called with every published result.
    ///
    /// Observers are invoked in registration order. Registering the same
    /// observer twice means it receives each result twice; no
    /// deduplication is performed.
    pub fn register_observer(&mut self, observer: LumaObserver) {
        self.observers.push(observer);
    }

    /// Current frame-rate estimate, `None` until the timestamp window
    /// holds at least two samples.
    pub fn frames_per_second(&self) -> Option<f64> {
        self.rate.frames_per_second()
    }

    /// Analyze one frame. Sole ingress point, called by the delivery
    /// pipeline for every frame in arrival order.
    ///
    /// The frame is counted toward the rate estimate on every call, but
    /// mean luminance is computed at most once per throttle interval.
    /// Empty planes are skipped without advancing the throttle clock.
    pub fn analyze(&mut self, frame: LumaFrame<'_>) {
        // With nobody listening there is no reason to touch the buffer,
        // or even to track the rate.
        if self.observers.is_empty() {
            return;
        }

        self.rate.record(frame.timestamp_ms);

        let due = match self.last_analyzed_ms {
            None => true,
            Some(last) => frame.timestamp_ms.saturating_sub(last) >= self.throttle_ms,
        };
        if !due {
            return;
        }

        let Some(mean_luma) = mean_luma(frame.plane) else {
            trace!("Skipping empty luminance plane");
            return;
        };

        self.last_analyzed_ms = Some(frame.timestamp_ms);
        let result = AnalysisResult {
            mean_luma,
            computed_at_ms: frame.timestamp_ms,
        };

        for observer in &self.observers {
            observer(&result);
        }
    }
}

/// Arithmetic mean of the plane bytes as unsigned 0-255 values, or
/// `None` for an empty plane.
fn mean_luma(plane: &[u8]) -> Option<f64> {
    if plane.is_empty() {
        return None;
    }
    let sum: u64 = plane.iter().map(|&b| u64::from(b)).sum();
    Some(sum as f64 / plane.len() as f64)
}
