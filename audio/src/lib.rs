//! WAV loading and resampling for noise exemplar clips.
//!
//! Everything downstream of this crate works on [`Waveform`]: mono `f32`
//! samples at a known sample rate. [`WavLoader`] decodes PCM16 and 32-bit
//! float WAV files, averages multi-channel audio down to mono, and
//! resamples to the configured rate (16 kHz by default).
//!
//! The [`AudioLoader`] trait is the seam for other container formats or
//! test stubs; catalog construction only ever sees the trait.

mod error;
mod loader;
mod resample;
mod wav;
mod waveform;

pub use error::AudioError;
pub use loader::{AudioLoader, WavLoader, WavLoaderConfig};
pub use resample::resample;
pub use waveform::{TARGET_SAMPLE_RATE, Waveform};
