// Sample-rate conversion and 16-bit quantization.
//
// Linear interpolation is deliberately simple: deterministic, allocation-
// bounded, and bit-reproducible for identical input. Transcription engines
// downstream do not benefit from a better filter.

/// Convert `samples` from `from_hz` to `to_hz` by linear interpolation.
///
/// Identity when the rates match. Output length is exactly
/// `floor(len / (from_hz / to_hz))`.
pub fn resample(samples: &[f32], from_hz: u32, to_hz: u32) -> Vec<f32> {
    if from_hz == to_hz || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = f64::from(from_hz) / f64::from(to_hz);
    let out_len = (samples.len() as f64 / ratio).floor() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src = i as f64 * ratio;
        let lo = src.floor() as usize;
        let hi = (lo + 1).min(samples.len() - 1);
        let frac = (src - lo as f64) as f32;
        out.push(samples[lo] + (samples[hi] - samples[lo]) * frac);
    }

    out
}

/// Quantize float samples to int16: clamp to [-1, 1], scale asymmetrically
/// (32767 positive, 32768 negative), round to nearest.
pub fn quantize(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| {
            let clamped = sample.clamp(-1.0, 1.0);
            let scaled = if clamped >= 0.0 {
                clamped * 32767.0
            } else {
                clamped * 32768.0
            };
            scaled.round() as i16
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resample_is_identity_for_equal_rates() {
        let samples = vec![0.1, -0.2, 0.3];
        assert_eq!(resample(&samples, 16000, 16000), samples);
    }

    #[test]
    fn resample_output_length_is_floor_of_ratio() {
        let samples = vec![0.0f32; 1000];
        assert_eq!(resample(&samples, 48000, 16000).len(), 333);
        assert_eq!(resample(&samples, 48000, 24000).len(), 500);
    }

    #[test]
    fn resample_interpolates_between_neighbors() {
        // 2:1 downsample of a ramp reads every second source index exactly.
        let samples = vec![0.0, 1.0, 2.0, 3.0];
        assert_eq!(resample(&samples, 32000, 16000), vec![0.0, 2.0]);
    }

    #[test]
    fn resample_is_deterministic() {
        let samples: Vec<f32> = (0..480).map(|i| (i as f32 * 0.013).sin()).collect();
        assert_eq!(
            resample(&samples, 48000, 16000),
            resample(&samples, 48000, 16000)
        );
    }

    #[test]
    fn quantize_scales_and_clamps() {
        let quantized = quantize(&[1.0, -1.0, 0.0, 0.5, -0.5, 2.0, -2.0]);
        assert_eq!(quantized, vec![32767, -32768, 0, 16384, -16384, 32767, -32768]);
    }
}
