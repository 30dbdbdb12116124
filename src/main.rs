//! Helios luminance analysis pipeline demo

use std::sync::Arc;

use color_eyre::Result;
use flume::bounded;
use tracing::{debug, error, info};

use helios::analysis::{result_sink, LumaAnalyzer};
use helios::capture::{Frame, SyntheticCapture};
use helios::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling and logging
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter("helios=debug")
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .init();

    info!("Helios launching...");

    // Load configuration
    let config = Config::load();
    helios::CONFIG.store(Arc::new(config.clone()));

    // Initialize the frame source
    let mut capture = SyntheticCapture::new(config.capture)?;

    // Set up tx/rx
    let (tx, rx) = bounded::<Frame>(config.pipeline.frame_channel_capacity);

    // Spawn capture task
    let _capture_handle = tokio::spawn(async move {
        loop {
            let frame = capture.capture_frame().await;
            if let Err(e) = tx.send_async(frame).await {
                error!("Failed to send frame: {}", e);
                break;
            }
        }
    });

    // Slow consumers sit behind a non-blocking sink so they can never
    // stall frame delivery.
    let (sink_observer, sink) = result_sink(config.pipeline.result_queue_capacity);

    // Analysis task: owns the analyzer, drains the frame channel
    let mut analyzer = LumaAnalyzer::new(&config.analyzer);
    analyzer.register_observer(sink_observer);
    let _analysis_handle = tokio::spawn(async move {
        while let Ok(frame) = rx.recv_async().await {
            analyzer.analyze(frame.luma_view());
            if let Some(fps) = analyzer.frames_per_second() {
                debug!(
                    "Frame {} analyzed, estimated rate {:.1} fps",
                    frame.meta.sequence, fps
                );
            }
        }
    });

    // Result consumer task
    let _consumer_handle = tokio::spawn(async move {
        while let Ok(result) = sink.recv_async().await {
            info!(
                "Average luminosity: {:.2} at t+{}ms",
                result.mean_luma, result.computed_at_ms
            );
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Helios shutting down");
    Ok(())
}
