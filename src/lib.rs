pub mod analysis;
pub mod capture;
pub mod utils;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Global configuration that can be atomically swapped at runtime
pub static CONFIG: once_cell::sync::Lazy<ArcSwap<Config>> =
    once_cell::sync::Lazy::new(|| ArcSwap::from_pointee(Config::default()));

/// System configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Number of arrival timestamps kept for the fps estimate
    pub frame_rate_window: usize,
    /// Minimum interval between successive luminance computations
    pub throttle_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Capacity of the capture -> analysis frame channel
    pub frame_channel_capacity: usize,
    /// Capacity of the non-blocking result sink queue
    pub result_queue_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            frame_rate_window: 8,
            throttle_ms: 1000,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_channel_capacity: 8,
            result_queue_capacity: 16,
        }
    }
}

impl Config {
    /// Load configuration from an optional `helios.toml` in the working
    /// directory, falling back to defaults on any error.
    pub fn load() -> Self {
        let loaded = config::Config::builder()
            .add_source(config::File::with_name("helios").required(false))
            .build()
            .and_then(|c| c.try_deserialize::<Config>());

        match loaded {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load helios.toml, using defaults: {}", e);
                Config::default()
            }
        }
    }
}
