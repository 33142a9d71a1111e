//! Live capture session management
//!
//! This module provides the `CaptureSession` abstraction that manages:
//! - Per-speaker frame ingestion into the packet store
//! - Speaking segment tracking for downstream chronology merging
//! - Periodic checkpoint drain-and-encode cycles
//! - Final stop/flush producing the full-session container

mod checkpoint;
mod segments;
mod session;

pub use segments::{SegmentTracker, SpeakingSegment};
pub use session::{CaptureSession, SessionConfig, SessionState, SessionStats};
