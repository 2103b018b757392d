use std::path::Path;

use crate::error::AudioError;
use crate::resample::resample;
use crate::wav::read_wav;
use crate::waveform::{TARGET_SAMPLE_RATE, Waveform};

/// Loads audio files as mono waveforms at a fixed sample rate.
///
/// # Thread Safety
///
/// Implementations must be safe to call concurrently; catalog builds load
/// several clips in parallel through one shared loader.
pub trait AudioLoader: Send + Sync {
    /// Decodes the file at `path` into a mono waveform at [`AudioLoader::sample_rate`].
    fn load(&self, path: &Path) -> Result<Waveform, AudioError>;

    /// The sample rate every loaded waveform is delivered at, in Hz.
    fn sample_rate(&self) -> u32;
}

/// Configuration for [`WavLoader`].
#[derive(Debug, Clone)]
pub struct WavLoaderConfig {
    /// Sample rate loaded waveforms are resampled to, in Hz.
    pub sample_rate: u32,
}

impl Default for WavLoaderConfig {
    fn default() -> Self {
        Self {
            sample_rate: TARGET_SAMPLE_RATE,
        }
    }
}

/// WAV file loader: decodes PCM16 or 32-bit float, averages channels down
/// to mono, and resamples when the file rate differs from the target.
#[derive(Debug, Clone)]
pub struct WavLoader {
    cfg: WavLoaderConfig,
}

impl WavLoader {
    /// Creates a loader targeting 16 kHz.
    pub fn new() -> Self {
        Self::with_config(WavLoaderConfig::default())
    }

    /// Creates a loader with explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if `cfg.sample_rate` is 0.
    pub fn with_config(cfg: WavLoaderConfig) -> Self {
        assert!(cfg.sample_rate > 0, "sample rate must be positive");
        Self { cfg }
    }
}

impl Default for WavLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioLoader for WavLoader {
    fn load(&self, path: &Path) -> Result<Waveform, AudioError> {
        let (interleaved, channels, src_rate) = read_wav(path)?;
        if interleaved.is_empty() {
            return Err(AudioError::Empty(path.to_path_buf()));
        }
        let wav = Waveform::from_interleaved(&interleaved, channels as usize, src_rate);
        if wav.sample_rate() == self.cfg.sample_rate {
            return Ok(wav);
        }
        let samples = resample(wav.samples(), src_rate, self.cfg.sample_rate)?;
        Ok(Waveform::new(samples, self.cfg.sample_rate))
    }

    fn sample_rate(&self) -> u32 {
        self.cfg.sample_rate
    }
}
