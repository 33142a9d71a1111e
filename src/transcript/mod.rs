//! Transcript skeleton reconstruction
//!
//! Takes per-speaker text produced by the transcription engine and turns it
//! into the ordered, scene-partitioned, bounded-size chunks the generation
//! engine consumes.

pub mod chunk;
pub mod line;
pub mod merge;
pub mod scene;

pub use chunk::{build_chunks, ChunkPolicy};
pub use line::{format_timestamp, parse_transcript, TranscriptLine};
pub use merge::merge_chronological;
pub use scene::{assign, boundaries_from_cut_points, boundaries_from_width, SceneBoundary};
