//! Offline sample rate conversion built on rubato's FFT resampler.

use rubato::{FftFixedInOut, Resampler as RubatoResampler};

use crate::error::AudioError;

/// Frames per processing block.
const CHUNK_SIZE: usize = 1024;

/// Converts mono samples from `src_rate` to `dst_rate` in one pass.
///
/// The resampler's startup delay is trimmed so the output aligns with the
/// input. Output length is `round(len * dst / src)`, clamped to at least 1
/// for non-empty input. Equal rates and empty input pass through unchanged.
pub fn resample(samples: &[f32], src_rate: u32, dst_rate: u32) -> Result<Vec<f32>, AudioError> {
    if src_rate == dst_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler =
        FftFixedInOut::<f32>::new(src_rate as usize, dst_rate as usize, CHUNK_SIZE, 1)
            .map_err(|e| AudioError::Resample(e.to_string()))?;

    let delay = resampler.output_delay();
    let ratio = dst_rate as f64 / src_rate as f64;
    let expected = ((samples.len() as f64 * ratio).round() as usize).max(1);

    let mut produced: Vec<f32> = Vec::with_capacity(expected + delay);
    let mut input_buf = vec![Vec::new()];
    let mut output_buf = vec![Vec::new()];
    let mut pos = 0;

    // Feed fixed-size chunks, zero-padded past the end of the signal,
    // until the delay plus the full output length has come through.
    while produced.len() < delay + expected {
        let needed = resampler.input_frames_next();
        input_buf[0].clear();
        if pos < samples.len() {
            let n = needed.min(samples.len() - pos);
            input_buf[0].extend_from_slice(&samples[pos..pos + n]);
            pos += n;
        }
        input_buf[0].resize(needed, 0.0);

        output_buf[0].clear();
        output_buf[0].resize(resampler.output_frames_next(), 0.0);

        let (_, written) = resampler
            .process_into_buffer(&input_buf, &mut output_buf, None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        produced.extend_from_slice(&output_buf[0][..written]);
    }

    Ok(produced[delay..delay + expected].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn test_same_rate_passthrough() {
        let input = vec![0.1, -0.2, 0.3];
        let out = resample(&input, 16000, 16000).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_empty_input() {
        let out = resample(&[], 8000, 16000).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_upsample_doubles_length() {
        let input = vec![0.0f32; 8000];
        let out = resample(&input, 8000, 16000).unwrap();
        assert_eq!(out.len(), 16000);
        assert!(out.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_downsample_preserves_tone_energy() {
        // 440 Hz sine, well inside the 4 kHz Nyquist band of the output.
        let input: Vec<f32> = (0..16000)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 16000.0).sin())
            .collect();
        let out = resample(&input, 16000, 8000).unwrap();
        assert_eq!(out.len(), 8000);
        assert!((rms(&out) - rms(&input)).abs() < 0.05);
    }

    #[test]
    fn test_dc_level_preserved() {
        let input = vec![0.5f32; 8000];
        let out = resample(&input, 8000, 16000).unwrap();
        let mid = &out[4000..12000];
        let mean = mid.iter().sum::<f32>() / mid.len() as f32;
        assert!((mean - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_tiny_input_yields_at_least_one_sample() {
        let out = resample(&[0.25, 0.25, 0.25], 48000, 16000).unwrap();
        assert_eq!(out.len(), 1);
    }
}
