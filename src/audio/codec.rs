// Bridge to the libopus decoder.
//
// One compressed frame in, mono f32 PCM at the Opus native rate out. The
// decoder is always configured stereo: libopus upmixes mono packets to two
// identical channels, so the L/R average below is lossless for mono sources.

use audiopus::coder::Decoder;
use audiopus::{Channels, SampleRate};

use crate::error::CaptureError;

/// Native decode rate of the compressed streams.
pub const OPUS_SAMPLE_RATE: u32 = 48_000;

/// Largest legal Opus frame: 120 ms at 48 kHz, per channel.
const MAX_FRAME_SAMPLES: usize = 5760;

/// Decode a single compressed frame into mono samples at 48 kHz.
///
/// Stateless by design: callers batch independent frames and tolerate
/// individual failures, so no decoder state is carried across frames.
pub fn decode_frame(payload: &[u8]) -> Result<Vec<f32>, CaptureError> {
    let mut decoder = Decoder::new(SampleRate::Hz48000, Channels::Stereo)?;

    let mut interleaved = vec![0.0f32; MAX_FRAME_SAMPLES * 2];
    let samples_per_channel = decoder.decode_float(Some(payload), &mut interleaved, false)?;
    interleaved.truncate(samples_per_channel * 2);

    // Downmix to mono by averaging left and right.
    let mono = interleaved
        .chunks_exact(2)
        .map(|pair| (pair[0] + pair[1]) * 0.5)
        .collect();

    Ok(mono)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_payload_is_rejected() {
        assert!(decode_frame(&[]).is_err());
    }
}
