//! Synthetic frame source for running the pipeline without a camera

use std::sync::Arc;

use bytes::Bytes;
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tracing::info;

use crate::capture::frame::{Frame, FrameMetadata};
use crate::{utils, CaptureConfig};

/// Errors raised while configuring a capture source
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("invalid capture geometry {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },
    #[error("capture rate must be non-zero")]
    ZeroRate,
}

/// Paced generator of single-plane test-pattern frames.
///
/// Stands in for a real camera delivery pipeline: frames come out at the
/// configured rate, one at a time, each with a fresh sequence number and
/// arrival timestamp.
pub struct SyntheticCapture {
    config: CaptureConfig,
    sequence: u64,
    ticker: Interval,
}

impl SyntheticCapture {
    pub fn new(config: CaptureConfig) -> Result<Self, CaptureError> {
        if config.width == 0 || config.height == 0 {
            return Err(CaptureError::InvalidGeometry {
                width: config.width,
                height: config.height,
            });
        }
        if config.fps == 0 {
            return Err(CaptureError::ZeroRate);
        }

        info!(
            "Synthetic capture: {}x{} @ {} fps",
            config.width, config.height, config.fps
        );

        let period_us = (1_000_000 / u64::from(config.fps)).max(1);
        let mut ticker = interval(Duration::from_micros(period_us));
        // If a consumer stalls we resume at the nominal rate rather than
        // bursting to catch up.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Ok(Self {
            config,
            sequence: 0,
            ticker,
        })
    }

    /// Produce the next frame, waiting out the inter-frame interval.
    pub async fn capture_frame(&mut self) -> Frame {
        self.ticker.tick().await;

        self.sequence += 1;
        let data = self.render_plane();
        let timestamp_ms = utils::monotonic_ms();

        let meta = Arc::new(FrameMetadata {
            sequence: self.sequence,
            width: self.config.width,
            height: self.config.height,
            stride: self.config.width,
        });

        Frame {
            data,
            meta,
            timestamp_ms,
        }
    }

    /// Rolling-gradient test pattern. The phase shifts with the sequence
    /// number so mean luminance drifts over time and the analysis output
    /// is visibly alive.
    fn render_plane(&self) -> Bytes {
        let width = self.config.width as usize;
        let height = self.config.height as usize;
        let phase = self.sequence.wrapping_mul(3);

        let mut plane = vec![0u8; width * height];
        for (y, row) in plane.chunks_exact_mut(width).enumerate() {
            for (x, sample) in row.iter_mut().enumerate() {
                *sample = ((x + y) as u64).wrapping_add(phase) as u8;
            }
        }
        Bytes::from(plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32, fps: u32) -> CaptureConfig {
        CaptureConfig { width, height, fps }
    }

    #[test]
    fn rejects_degenerate_geometry() {
        assert!(matches!(
            SyntheticCapture::new(config(0, 480, 30)),
            Err(CaptureError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            SyntheticCapture::new(config(640, 0, 30)),
            Err(CaptureError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn rejects_zero_rate() {
        assert!(matches!(
            SyntheticCapture::new(config(640, 480, 0)),
            Err(CaptureError::ZeroRate)
        ));
    }

    #[tokio::test]
    async fn frames_have_full_planes_and_increasing_sequence() {
        let mut capture = SyntheticCapture::new(config(32, 16, 1000)).unwrap();

        let first = capture.capture_frame().await;
        let second = capture.capture_frame().await;

        assert_eq!(first.data.len(), 32 * 16);
        assert_eq!(first.meta.sequence, 1);
        assert_eq!(second.meta.sequence, 2);
        assert_eq!(second.meta.width, 32);
        assert_eq!(second.meta.stride, 32);
    }
}
