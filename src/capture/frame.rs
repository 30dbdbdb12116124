use bytes::Bytes;
use std::sync::Arc;

use crate::analysis::LumaFrame;

/// Frame data with zero-copy semantics
#[derive(Clone)]
pub struct Frame {
    /// Immutable single-plane luminance data - can be shared across
    /// threads without copying
    pub data: Bytes,

    /// Frame metadata
    pub meta: Arc<FrameMetadata>,

    /// Arrival timestamp in monotonic milliseconds
    pub timestamp_ms: u64,
}

/// Frame metadata
#[derive(Debug, Clone)]
pub struct FrameMetadata {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub stride: u32,
}

impl Frame {
    /// Borrowed view of the luminance plane for analysis. The view is
    /// tied to this frame's lifetime, so the analyzer cannot outlive it.
    pub fn luma_view(&self) -> LumaFrame<'_> {
        LumaFrame {
            plane: &self.data,
            timestamp_ms: self.timestamp_ms,
        }
    }
}
