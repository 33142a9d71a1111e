// Canonical WAV container serialization.
//
// Containers are built fully in memory (44-byte RIFF/WAVE header + int16
// little-endian payload) and written to disk temp-then-rename so a partially
// written artifact is never observable at the final path.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

use crate::error::CaptureError;

/// Target rate for persisted containers; what transcription engines expect.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Serialize mono int16 samples into a complete WAV byte buffer.
///
/// Total length is `44 + 2 * samples.len()`.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, CaptureError> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    let mut writer = hound::WavWriter::new(&mut cursor, wav_spec(sample_rate))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(cursor.into_inner())
}

/// One second of silence at `sample_rate`: the guaranteed fallback artifact
/// when a stop or checkpoint finds nothing encodable.
pub fn silent_wav(sample_rate: u32) -> Result<Vec<u8>, CaptureError> {
    encode_wav(&vec![0i16; sample_rate as usize], sample_rate)
}

/// Persist container bytes all-or-nothing.
///
/// The caller guarantees the parent directory exists. The temp file lives
/// next to the target so the rename stays within one filesystem.
pub fn write_wav(path: &Path, bytes: &[u8]) -> Result<(), CaptureError> {
    let tmp = path.with_extension("wav.tmp");
    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(CaptureError::ContainerWrite {
            path: path.to_path_buf(),
            source,
        });
    }

    info!("Wrote container: {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
