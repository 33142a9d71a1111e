use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the capture and encode pipeline.
///
/// Frame-level decode failures are tolerated and counted by batch encoding;
/// they only surface here when an entire batch yields no usable audio.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// A single compressed frame failed to decode.
    #[error("opus frame decode failed: {0}")]
    FrameDecode(#[from] audiopus::Error),

    /// Every frame in a batch failed to decode.
    #[error("no usable audio decoded from batch ({failed_frames} frame decode failures)")]
    NoAudioDecoded { failed_frames: usize },

    /// The batch contained no frames at all.
    #[error("no audio frames collected")]
    NoAudioCollected,

    /// Container serialization failed.
    #[error("wav encoding failed: {0}")]
    WavEncode(#[from] hound::Error),

    /// Disk write of a finished container failed. Fatal for that artifact
    /// only; session capture continues.
    #[error("failed to write container {path}: {source}")]
    ContainerWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A periodic checkpoint cycle failed. Logged by the scheduler, never
    /// propagated to the live capture path.
    #[error("checkpoint {index} failed: {source}")]
    Checkpoint {
        index: u64,
        #[source]
        source: Box<CaptureError>,
    },

    /// The session's output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `stop()` was called on a session that already stopped.
    #[error("session already stopped")]
    AlreadyStopped,

    /// A background encode task panicked or was cancelled.
    #[error("encode task failed: {0}")]
    EncodeTask(#[from] tokio::task::JoinError),
}

impl CaptureError {
    /// True when the batch produced nothing encodable and the caller should
    /// substitute the silent fallback container.
    pub fn is_empty_batch(&self) -> bool {
        matches!(self, Self::NoAudioCollected | Self::NoAudioDecoded { .. })
    }
}
