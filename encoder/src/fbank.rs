//! Log mel filterbank feature extraction.
//!
//! This is the batteries-included [`FeatureExtractor`]: Kaldi-style log mel
//! energies computed on the CPU, no model weights required. Clips whose
//! average spectra differ (hum vs. hiss vs. glitch) land far apart after
//! pooling, which is what exemplar retrieval needs.

use std::f64::consts::PI;

use noisebank_audio::Waveform;

use crate::error::EncoderError;
use crate::extractor::FeatureExtractor;
use crate::features::FeatureFrames;

/// Configures mel filterbank extraction.
///
/// Defaults follow Kaldi: Povey window, 25ms frames, 10ms shift, 80 mel
/// bins over 20-7600 Hz at a 16 kHz input rate.
#[derive(Debug, Clone)]
pub struct FbankConfig {
    /// Expected input sample rate in Hz (default: 16000).
    pub sample_rate: u32,
    /// Number of mel filterbank channels (default: 80).
    pub num_mels: usize,
    /// Frame length in samples (default: 400 = 25ms @ 16kHz).
    pub frame_length: usize,
    /// Frame shift in samples (default: 160 = 10ms @ 16kHz).
    pub frame_shift: usize,
    /// Pre-emphasis coefficient (default: 0.97).
    pub pre_emphasis: f64,
    /// Floor for log energy (default: 1e-10).
    pub energy_floor: f64,
    /// Low cutoff frequency for mel bins (default: 20 Hz).
    pub low_freq: f64,
    /// High cutoff frequency, non-positive = offset from Nyquist (default: -400).
    pub high_freq: f64,
    /// Remove DC offset per frame (default: true).
    pub remove_dc: bool,
    /// Use Povey window (hamming^0.85) instead of Hamming (default: true).
    pub povey_window: bool,
}

impl Default for FbankConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            num_mels: 80,
            frame_length: 400,
            frame_shift: 160,
            pre_emphasis: 0.97,
            energy_floor: 1e-10,
            low_freq: 20.0,
            high_freq: -400.0,
            remove_dc: true,
            povey_window: true,
        }
    }
}

/// Log mel filterbank extractor.
///
/// Produces one frame every `frame_shift` samples; clips shorter than a
/// single analysis window are zero-padded to exactly one frame, so every
/// non-empty waveform yields at least one frame.
#[derive(Debug, Clone)]
pub struct FbankExtractor {
    cfg: FbankConfig,
}

impl FbankExtractor {
    /// Creates an extractor with Kaldi defaults (16 kHz, 80 mels).
    pub fn new() -> Self {
        Self::with_config(FbankConfig::default())
    }

    /// Creates an extractor with explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate`, `num_mels`, `frame_length`, or
    /// `frame_shift` is 0.
    pub fn with_config(cfg: FbankConfig) -> Self {
        assert!(cfg.sample_rate > 0, "sample rate must be positive");
        assert!(cfg.num_mels > 0, "mel channel count must be positive");
        assert!(cfg.frame_length > 0, "frame length must be positive");
        assert!(cfg.frame_shift > 0, "frame shift must be positive");
        Self { cfg }
    }

    pub fn config(&self) -> &FbankConfig {
        &self.cfg
    }
}

impl Default for FbankExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for FbankExtractor {
    fn extract(&self, wav: &Waveform) -> Result<FeatureFrames, EncoderError> {
        if wav.sample_rate() != self.cfg.sample_rate {
            return Err(EncoderError::SampleRate {
                got: wav.sample_rate(),
                want: self.cfg.sample_rate,
            });
        }
        let frames = compute_fbank(wav.samples(), &self.cfg);
        FeatureFrames::all_valid(frames)
    }

    fn dimension(&self) -> usize {
        self.cfg.num_mels
    }
}

/// Computes log mel filterbank features for mono float samples.
///
/// Output shape is `[num_frames][num_mels]`. Input shorter than one frame
/// window (including empty input) is zero-padded to a single frame.
pub fn compute_fbank(samples: &[f32], cfg: &FbankConfig) -> Vec<Vec<f32>> {
    // Work in f64 until the final log energies.
    let mut signal: Vec<f64> = samples.iter().map(|&s| s as f64).collect();
    if signal.len() < cfg.frame_length {
        signal.resize(cfg.frame_length, 0.0);
    }

    let num_frames = (signal.len() - cfg.frame_length) / cfg.frame_shift + 1;
    let fft_size = next_pow2(cfg.frame_length);
    let half_fft = fft_size / 2 + 1;

    let window = if cfg.povey_window {
        povey_window(cfg.frame_length)
    } else {
        hamming_window(cfg.frame_length)
    };

    let high_freq = if cfg.high_freq <= 0.0 {
        cfg.sample_rate as f64 / 2.0 + cfg.high_freq
    } else {
        cfg.high_freq
    };
    let filterbank = mel_filterbank(
        cfg.num_mels,
        fft_size,
        cfg.sample_rate as usize,
        cfg.low_freq,
        high_freq,
    );

    let mut result = Vec::with_capacity(num_frames);
    let mut fft_buf = vec![(0.0f64, 0.0f64); fft_size];

    for f in 0..num_frames {
        let offset = f * cfg.frame_shift;
        let mut frame_buf: Vec<f64> = signal[offset..offset + cfg.frame_length].to_vec();

        if cfg.remove_dc {
            let mean: f64 = frame_buf.iter().sum::<f64>() / cfg.frame_length as f64;
            for v in &mut frame_buf {
                *v -= mean;
            }
        }

        // Pre-emphasis runs backwards so each sample sees its original neighbor.
        if cfg.pre_emphasis > 0.0 {
            for i in (1..cfg.frame_length).rev() {
                frame_buf[i] -= cfg.pre_emphasis * frame_buf[i - 1];
            }
            frame_buf[0] *= 1.0 - cfg.pre_emphasis;
        }

        for v in &mut fft_buf {
            *v = (0.0, 0.0);
        }
        for i in 0..cfg.frame_length {
            fft_buf[i] = (frame_buf[i] * window[i], 0.0);
        }
        fft(&mut fft_buf);

        let mut power_spec = vec![0.0f64; half_fft];
        for (k, p) in power_spec.iter_mut().enumerate() {
            let (re, im) = fft_buf[k];
            *p = re * re + im * im;
        }

        let mut frame = vec![0.0f32; cfg.num_mels];
        for (m, out) in frame.iter_mut().enumerate() {
            let mut energy: f64 = 0.0;
            for (k, &w) in filterbank[m].iter().enumerate() {
                energy += w * power_spec[k];
            }
            if energy < cfg.energy_floor {
                energy = cfg.energy_floor;
            }
            *out = energy.ln() as f32;
        }
        result.push(frame);
    }
    result
}

fn next_pow2(n: usize) -> usize {
    let mut p = 1;
    while p < n {
        p <<= 1;
    }
    p
}

fn hamming_window(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

/// Povey window (hamming^0.85) used by Kaldi.
fn povey_window(n: usize) -> Vec<f64> {
    hamming_window(n).into_iter().map(|w| w.powf(0.85)).collect()
}

fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank weights, `[num_mels][half_fft]`.
fn mel_filterbank(
    num_mels: usize,
    fft_size: usize,
    sample_rate: usize,
    low_freq: f64,
    high_freq: f64,
) -> Vec<Vec<f64>> {
    let half_fft = fft_size / 2 + 1;
    let mel_low = hz_to_mel(low_freq);
    let mel_high = hz_to_mel(high_freq);

    let mel_points: Vec<f64> = (0..num_mels + 2)
        .map(|i| mel_low + i as f64 * (mel_high - mel_low) / (num_mels + 1) as f64)
        .collect();

    let bin_indices: Vec<usize> = mel_points
        .iter()
        .map(|&m| {
            let hz = mel_to_hz(m);
            let bin = (hz * fft_size as f64 / sample_rate as f64).floor() as isize;
            bin.max(0).min(half_fft as isize - 1) as usize
        })
        .collect();

    let mut fb = Vec::with_capacity(num_mels);
    for m in 0..num_mels {
        let mut filter = vec![0.0f64; half_fft];
        let left = bin_indices[m];
        let center = bin_indices[m + 1];
        let right = bin_indices[m + 2];

        if center > left {
            for k in left..=center {
                filter[k] = (k - left) as f64 / (center - left) as f64;
            }
        }
        if right > center {
            for k in center..=right {
                filter[k] = (right - k) as f64 / (right - center) as f64;
            }
        }
        fb.push(filter);
    }
    fb
}

/// In-place Cooley-Tukey FFT over (real, imag) pairs.
/// Input length must be a power of 2.
fn fft(x: &mut [(f64, f64)]) {
    let n = x.len();
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation.
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            x.swap(i, j);
        }
    }

    // Butterflies.
    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let angle = -2.0 * PI / size as f64;
        let wn = (angle.cos(), angle.sin());
        let mut start = 0;
        while start < n {
            let mut w = (1.0, 0.0);
            for k in 0..half {
                let u = x[start + k];
                let t_re = w.0 * x[start + k + half].0 - w.1 * x[start + k + half].1;
                let t_im = w.0 * x[start + k + half].1 + w.1 * x[start + k + half].0;
                x[start + k] = (u.0 + t_re, u.1 + t_im);
                x[start + k + half] = (u.0 - t_re, u.1 - t_im);
                let new_w_re = w.0 * wn.0 - w.1 * wn.1;
                let new_w_im = w.0 * wn.1 + w.1 * wn.0;
                w = (new_w_re, new_w_im);
            }
            start += size;
        }
        size <<= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq_hz: f64, n_samples: usize, sample_rate: u32) -> Waveform {
        let samples: Vec<f32> = (0..n_samples)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                (0.5 * (freq_hz * 2.0 * PI * t).sin()) as f32
            })
            .collect();
        Waveform::new(samples, sample_rate)
    }

    #[test]
    fn test_default_config() {
        let cfg = FbankConfig::default();
        assert_eq!(cfg.sample_rate, 16000);
        assert_eq!(cfg.num_mels, 80);
        assert_eq!(cfg.frame_length, 400);
        assert_eq!(cfg.frame_shift, 160);
    }

    #[test]
    fn test_silence_frame_count() {
        // (800 - 400) / 160 + 1 = 3 frames.
        let frames = compute_fbank(&vec![0.0f32; 800], &FbankConfig::default());
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].len(), 80);
    }

    #[test]
    fn test_short_input_padded_to_one_frame() {
        let frames = compute_fbank(&[0.1f32; 100], &FbankConfig::default());
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 80);
    }

    #[test]
    fn test_tone_produces_varied_energies() {
        let wav = sine(440.0, 16000, 16000);
        let frames = compute_fbank(wav.samples(), &FbankConfig::default());
        // (16000 - 400) / 160 + 1 = 98 frames.
        assert_eq!(frames.len(), 98);
        let first = &frames[0];
        assert!(
            first.windows(2).any(|w| (w[0] - w[1]).abs() > 0.01),
            "tone should produce non-uniform mel energies"
        );
    }

    #[test]
    fn test_deterministic() {
        let wav = sine(700.0, 4000, 16000);
        let cfg = FbankConfig::default();
        let a = compute_fbank(wav.samples(), &cfg);
        let b = compute_fbank(wav.samples(), &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_tones_separate() {
        let cfg = FbankConfig::default();
        let low = compute_fbank(sine(200.0, 4000, 16000).samples(), &cfg);
        let high = compute_fbank(sine(4000.0, 4000, 16000).samples(), &cfg);
        // Frame-wise features of a 200 Hz and a 4 kHz tone must differ.
        let diff: f32 = low[0]
            .iter()
            .zip(&high[0])
            .map(|(a, b)| (a - b).abs())
            .sum();
        assert!(diff > 1.0, "expected distinct spectra, total diff {diff}");
    }

    #[test]
    fn test_extractor_rejects_wrong_rate() {
        let extractor = FbankExtractor::new();
        let wav = Waveform::new(vec![0.0; 8000], 8000);
        let err = extractor.extract(&wav).unwrap_err();
        assert!(matches!(
            err,
            EncoderError::SampleRate {
                got: 8000,
                want: 16000
            }
        ));
    }

    #[test]
    fn test_extractor_output_shape() {
        let extractor = FbankExtractor::new();
        let frames = extractor.extract(&sine(440.0, 800, 16000)).unwrap();
        assert_eq!(frames.num_frames(), 3);
        assert_eq!(frames.dimension(), extractor.dimension());
        assert_eq!(frames.valid_count(), 3);
    }

    #[test]
    fn test_fft_impulse() {
        // FFT of [1,0,0,0] is flat ones.
        let mut buf = vec![(1.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0)];
        fft(&mut buf);
        for (re, im) in &buf {
            assert!((re - 1.0).abs() < 1e-10);
            assert!(im.abs() < 1e-10);
        }
    }

    #[test]
    fn test_fft_parseval() {
        let n = 8;
        let mut buf: Vec<(f64, f64)> = (0..n)
            .map(|i| ((2.0 * PI * i as f64 / n as f64).sin(), 0.0))
            .collect();
        let time_energy: f64 = buf.iter().map(|(r, im)| r * r + im * im).sum();
        fft(&mut buf);
        let freq_energy: f64 = buf.iter().map(|(r, im)| r * r + im * im).sum();
        assert!((time_energy * n as f64 - freq_energy).abs() < 1e-8);
    }

    #[test]
    fn test_mel_hz_roundtrip() {
        for &hz in &[0.0, 100.0, 440.0, 1000.0, 8000.0] {
            let back = mel_to_hz(hz_to_mel(hz));
            assert!((hz - back).abs() < 1e-6);
        }
    }
}
