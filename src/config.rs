use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use crate::capture::SessionConfig;
use crate::transcript::ChunkPolicy;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub capture: CaptureConfig,
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    pub output_dir: PathBuf,
    pub sample_rate: u32,
    pub checkpoint_interval_secs: u64,
    pub per_speaker_tracks: bool,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptConfig {
    /// Fixed scene window width in seconds
    pub scene_width_secs: f64,
    pub max_chunk_chars: usize,
    pub min_line_chars: usize,
    pub skip_terms: Vec<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Session settings for a new capture session under this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            output_dir: self.capture.output_dir.clone(),
            sample_rate: self.capture.sample_rate,
            checkpoint_interval: Duration::from_secs(self.capture.checkpoint_interval_secs),
            per_speaker_tracks: self.capture.per_speaker_tracks,
            ..SessionConfig::default()
        }
    }

    pub fn chunk_policy(&self) -> ChunkPolicy {
        ChunkPolicy {
            max_chunk_chars: self.transcript.max_chunk_chars,
            min_line_chars: self.transcript.min_line_chars,
            skip_terms: self.transcript.skip_terms.clone(),
        }
    }
}
