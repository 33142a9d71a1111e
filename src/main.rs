use anyhow::Result;
use session_scribe::Config;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/session-scribe")?;

    info!("session-scribe v0.1.0");
    info!("Recordings directory: {}", cfg.capture.output_dir.display());
    info!("Container sample rate: {} Hz", cfg.capture.sample_rate);
    info!(
        "Checkpoint interval: {}s",
        cfg.capture.checkpoint_interval_secs
    );
    info!(
        "Scene width: {}s, chunk limit: {} chars",
        cfg.transcript.scene_width_secs, cfg.transcript.max_chunk_chars
    );

    Ok(())
}
