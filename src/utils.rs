use std::time::Instant;

use once_cell::sync::Lazy;

/// Process-wide monotonic epoch; all frame timestamps are measured
/// against this so they can be compared and subtracted safely.
static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// Milliseconds elapsed since the process epoch. Monotonic, never
/// affected by wall-clock adjustments.
pub fn monotonic_ms() -> u64 {
    EPOCH.elapsed().as_millis() as u64
}
