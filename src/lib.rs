pub mod audio;
pub mod capture;
pub mod config;
pub mod engines;
pub mod error;
pub mod transcript;

pub use audio::{AudioFrame, PacketStore, OPUS_SAMPLE_RATE, TARGET_SAMPLE_RATE};
pub use capture::{
    CaptureSession, SegmentTracker, SessionConfig, SessionState, SessionStats, SpeakingSegment,
};
pub use config::Config;
pub use engines::{Generator, Transcriber};
pub use error::CaptureError;
pub use transcript::{
    assign, boundaries_from_cut_points, boundaries_from_width, build_chunks, merge_chronological,
    parse_transcript, ChunkPolicy, SceneBoundary, TranscriptLine,
};
