//! Frame-rate estimation over a fixed window of arrival timestamps

use ringbuf::traits::{Consumer, Observer, RingBuffer};
use ringbuf::HeapRb;

/// Rolling window of frame-arrival timestamps (monotonic milliseconds)
/// with a derived frames-per-second estimate.
///
/// The window is a fixed-capacity ring: once full, recording a new
/// timestamp overwrites the oldest one, so memory use is bounded by
/// construction rather than by trimming logic.
pub struct RateWindow {
    timestamps: HeapRb<u64>,
    fps: Option<f64>,
}

impl RateWindow {
    /// Create a window holding up to `capacity` timestamps. A capacity
    /// below 2 could never produce an estimate, so it is clamped up.
    pub fn new(capacity: usize) -> Self {
        Self {
            timestamps: HeapRb::new(capacity.max(2)),
            fps: None,
        }
    }

    /// Record a frame arrival and refresh the estimate.
    pub fn record(&mut self, timestamp_ms: u64) {
        self.timestamps.push_overwrite(timestamp_ms);
        self.fps = self.estimate();
    }

    /// Current estimate, or `None` before two samples exist (or when the
    /// window span is zero or non-monotonic).
    pub fn frames_per_second(&self) -> Option<f64> {
        self.fps
    }

    pub fn len(&self) -> usize {
        self.timestamps.occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    fn estimate(&self) -> Option<f64> {
        let samples = self.timestamps.occupied_len();
        if samples < 2 {
            return None;
        }
        let oldest = *self.timestamps.iter().next()?;
        let newest = *self.timestamps.iter().last()?;
        // Guards both a zero span and a non-monotonic source.
        let elapsed_ms = newest.checked_sub(oldest).filter(|e| *e > 0)?;
        Some((samples as f64 - 1.0) * 1000.0 / elapsed_ms as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn undefined_below_two_samples() {
        let mut window = RateWindow::new(8);
        assert_eq!(window.frames_per_second(), None);
        window.record(100);
        assert_eq!(window.frames_per_second(), None);
        window.record(200);
        assert!(window.frames_per_second().is_some());
    }

    #[test]
    fn even_spacing_gives_exact_rate() {
        let mut window = RateWindow::new(8);
        // 30 fps: one frame every 33.333.. ms, use exact 100ms / 10fps.
        for i in 0..5u64 {
            window.record(i * 100);
        }
        assert_relative_eq!(window.frames_per_second().unwrap(), 10.0);
    }

    #[test]
    fn zero_span_is_undefined() {
        let mut window = RateWindow::new(8);
        window.record(500);
        window.record(500);
        window.record(500);
        assert_eq!(window.frames_per_second(), None);
    }

    #[test]
    fn non_monotonic_span_is_undefined_not_negative() {
        let mut window = RateWindow::new(8);
        window.record(1000);
        window.record(400);
        assert_eq!(window.frames_per_second(), None);
    }

    #[test]
    fn eviction_drops_oldest_from_estimate() {
        let mut window = RateWindow::new(4);
        // A slow burst followed by a fast one; once the slow timestamps
        // are evicted the estimate must reflect only the fast spacing.
        window.record(0);
        window.record(1000);
        for i in 0..4u64 {
            window.record(2000 + i * 10);
        }
        assert_eq!(window.len(), 4);
        // Window now holds [2000, 2010, 2020, 2030]: 3 intervals / 30ms.
        assert_relative_eq!(window.frames_per_second().unwrap(), 100.0);
    }

    #[test]
    fn capacity_is_clamped_to_two() {
        let mut window = RateWindow::new(0);
        window.record(0);
        window.record(100);
        assert_relative_eq!(window.frames_per_second().unwrap(), 10.0);
    }
}
