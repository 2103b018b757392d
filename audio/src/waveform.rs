use std::time::Duration;

/// Sample rate the rest of the pipeline expects, in Hz.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// A mono audio signal at a known sample rate.
///
/// Samples are float amplitudes, nominally in `[-1.0, 1.0]`. Multi-channel
/// input is averaged down to one channel before a `Waveform` exists, so
/// every consumer can assume mono.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    /// Wraps already-mono samples.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate` is 0.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        assert!(sample_rate > 0, "sample rate must be positive");
        Self {
            samples,
            sample_rate,
        }
    }

    /// Averages interleaved multi-channel samples down to mono.
    ///
    /// A trailing partial frame (fewer than `channels` samples) is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `channels` or `sample_rate` is 0.
    pub fn from_interleaved(interleaved: &[f32], channels: usize, sample_rate: u32) -> Self {
        assert!(channels > 0, "channel count must be positive");
        if channels == 1 {
            return Self::new(interleaved.to_vec(), sample_rate);
        }
        let frames = interleaved.len() / channels;
        let mut samples = Vec::with_capacity(frames);
        for frame in 0..frames {
            let start = frame * channels;
            let sum: f32 = interleaved[start..start + channels].iter().sum();
            samples.push(sum / channels as f32);
        }
        Self::new(samples, sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_passthrough() {
        let wav = Waveform::from_interleaved(&[0.1, -0.2, 0.3], 1, 16000);
        assert_eq!(wav.samples(), &[0.1, -0.2, 0.3]);
        assert_eq!(wav.sample_rate(), 16000);
    }

    #[test]
    fn test_stereo_downmix_averages_channels() {
        // Frames: (0.2, 0.4) -> 0.3, (-1.0, 1.0) -> 0.0
        let wav = Waveform::from_interleaved(&[0.2, 0.4, -1.0, 1.0], 2, 16000);
        assert_eq!(wav.len(), 2);
        assert!((wav.samples()[0] - 0.3).abs() < 1e-6);
        assert!(wav.samples()[1].abs() < 1e-6);
    }

    #[test]
    fn test_trailing_partial_frame_dropped() {
        let wav = Waveform::from_interleaved(&[0.5, 0.5, 0.9], 2, 8000);
        assert_eq!(wav.len(), 1);
    }

    #[test]
    fn test_duration() {
        let wav = Waveform::new(vec![0.0; 8000], 16000);
        assert_eq!(wav.duration(), Duration::from_millis(500));
    }

    #[test]
    #[should_panic]
    fn test_zero_sample_rate_panics() {
        Waveform::new(vec![0.0], 0);
    }
}
