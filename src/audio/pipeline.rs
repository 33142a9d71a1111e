// Batch encode: drained frames in, finished WAV container bytes out.
//
// Decode failures are tolerated per frame and counted; a batch only fails
// when it contains no frames or none of them decode.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::audio::codec::{decode_frame, OPUS_SAMPLE_RATE};
use crate::audio::resample::{quantize, resample};
use crate::audio::store::AudioFrame;
use crate::audio::wav::encode_wav;
use crate::error::CaptureError;

/// Encode a full drained batch into one container.
///
/// Frames from all speakers are flattened in capture-offset order; ties keep
/// their per-speaker arrival order (the sort is stable).
pub fn encode_batch(
    buckets: HashMap<u64, Vec<AudioFrame>>,
    target_rate: u32,
) -> Result<Vec<u8>, CaptureError> {
    let mut frames: Vec<AudioFrame> = buckets.into_values().flatten().collect();
    if frames.is_empty() {
        return Err(CaptureError::NoAudioCollected);
    }
    frames.sort_by_key(|frame| frame.capture_offset_ms);
    encode_frames(&frames, target_rate)
}

/// Encode a single speaker's frames into an isolated track container.
pub fn encode_speaker_track(
    frames: &[AudioFrame],
    target_rate: u32,
) -> Result<Vec<u8>, CaptureError> {
    if frames.is_empty() {
        return Err(CaptureError::NoAudioCollected);
    }
    encode_frames(frames, target_rate)
}

fn encode_frames(frames: &[AudioFrame], target_rate: u32) -> Result<Vec<u8>, CaptureError> {
    let mut pcm = Vec::new();
    let mut failed_frames = 0usize;

    for frame in frames {
        match decode_frame(&frame.payload) {
            Ok(samples) => pcm.extend_from_slice(&samples),
            Err(error) => {
                failed_frames += 1;
                debug!(
                    speaker = frame.speaker_id,
                    at_ms = frame.capture_offset_ms,
                    "frame decode failed: {error}"
                );
            }
        }
    }

    if pcm.is_empty() {
        return Err(CaptureError::NoAudioDecoded { failed_frames });
    }
    if failed_frames > 0 {
        warn!(
            "{failed_frames} of {} frames failed to decode; continuing with the rest",
            frames.len()
        );
    }

    let resampled = resample(&pcm, OPUS_SAMPLE_RATE, target_rate);
    encode_wav(&quantize(&resampled), target_rate)
}
