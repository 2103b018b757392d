//! Synthesizes the standard noise archetype clips.

use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::prelude::*;
use rand_distr::StandardNormal;
use tracing::debug;

use noisebank_catalog::ExemplarSpec;

use crate::Cli;

/// One synthetic noise archetype: a generator plus its exemplar caption.
struct Archetype {
    file_name: &'static str,
    caption: &'static str,
    /// Peak amplitude after normalization. The hum archetype stays faint.
    peak: f64,
    generate: fn(&mut StdRng, usize, u32) -> Vec<f64>,
}

static ARCHETYPES: [Archetype; 10] = [
    Archetype {
        file_name: "noise_flat.wav",
        caption: "Steady broadband noise with a flat spectrum; no distinct transients or tonal components.",
        peak: 0.9,
        generate: gen_flat,
    },
    Archetype {
        file_name: "noise_high_bias.wav",
        caption: "Steady broadband noise dominated by high frequencies (hiss-like); no distinct events or tones.",
        peak: 0.9,
        generate: gen_high_bias,
    },
    Archetype {
        file_name: "noise_low_bias.wav",
        caption: "Steady broadband noise dominated by low frequencies (rumble-like); no distinct events or tones.",
        peak: 0.9,
        generate: gen_low_bias,
    },
    Archetype {
        file_name: "noise_random_shape.wav",
        caption: "Steady broadband noise with an uneven spectrum; no clear transient events or stable tones.",
        peak: 0.9,
        generate: gen_random_shape,
    },
    Archetype {
        file_name: "bubble_noise.wav",
        caption: "Irregular synthetic noise with unstable, bubble-like temporal patterns and an atypical spectrum; no identifiable acoustic events or tonal structure.",
        peak: 0.9,
        generate: gen_bubble,
    },
    Archetype {
        file_name: "silence_device_hum.wav",
        caption: "Near-silent audio with extremely low energy and a faint, steady background hum; no discernible events or sound sources.",
        peak: 0.01,
        generate: gen_device_hum,
    },
    Archetype {
        file_name: "pink_noise.wav",
        caption: "Continuous broadband noise with stronger low-frequency energy following a 1/f distribution; no distinct events or tonal components.",
        peak: 0.9,
        generate: gen_pink,
    },
    Archetype {
        file_name: "bandpass_noise.wav",
        caption: "Narrow-band noise concentrated within a limited frequency range; no clear transient events or stable tonal patterns.",
        peak: 0.9,
        generate: gen_bandpass,
    },
    Archetype {
        file_name: "modulated_noise.wav",
        caption: "Broadband noise with periodic amplitude modulation over time; no structured rhythm, events, or identifiable sound sources.",
        peak: 0.9,
        generate: gen_modulated,
    },
    Archetype {
        file_name: "glitch_noise.wav",
        caption: "Synthetic digital glitch-like noise with abrupt discontinuities and non-natural spectral artifacts; no recognizable acoustic events.",
        peak: 0.9,
        generate: gen_glitch,
    },
];

/// Generates the synthetic noise archetype clips and an exemplar list.
#[derive(Args)]
pub struct SynthCommand {
    /// Output directory for the WAV clips and exemplars.json
    #[arg(long, default_value = "noises")]
    out_dir: PathBuf,

    /// Seed for the generators; same seed, same clips
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Clip length in seconds
    #[arg(long, default_value_t = 1.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 16000)]
    sample_rate: u32,
}

impl SynthCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let num_samples = (self.duration * self.sample_rate as f64) as usize;
        anyhow::ensure!(num_samples > 0, "duration too short: {}s", self.duration);
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create {}", self.out_dir.display()))?;

        let mut specs = Vec::with_capacity(ARCHETYPES.len());
        for (index, archetype) in ARCHETYPES.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(index as u64));
            let samples = (archetype.generate)(&mut rng, num_samples, self.sample_rate);
            let samples = normalize_peak(samples, archetype.peak);
            let path = self.out_dir.join(archetype.file_name);
            write_wav(&path, &samples, self.sample_rate)
                .with_context(|| format!("write {}", path.display()))?;
            debug!("generated {}: {} samples", archetype.file_name, samples.len());
            if !cli.json {
                println!("wrote {}", path.display());
            }
            specs.push(ExemplarSpec {
                source_path: path.to_string_lossy().into_owned(),
                caption: archetype.caption.to_string(),
            });
        }

        let list_path = self.out_dir.join("exemplars.json");
        let json = serde_json::to_string_pretty(&specs)?;
        fs::write(&list_path, json).with_context(|| format!("write {}", list_path.display()))?;

        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "clips": specs.len(),
                    "exemplars": list_path,
                })
            );
        } else {
            println!("wrote {} ({} exemplars)", list_path.display(), specs.len());
        }
        Ok(())
    }
}

fn white(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.sample(StandardNormal)).collect()
}

/// White gaussian noise, flat across the band.
fn gen_flat(rng: &mut StdRng, n: usize, _sample_rate: u32) -> Vec<f64> {
    white(rng, n)
}

/// First difference of white noise tilts the spectrum towards +6 dB/octave.
fn gen_high_bias(rng: &mut StdRng, n: usize, _sample_rate: u32) -> Vec<f64> {
    let w = white(rng, n);
    let mut out = Vec::with_capacity(n);
    let mut prev = 0.0;
    for &x in &w {
        out.push(x - prev);
        prev = x;
    }
    out
}

/// One-pole lowpass over white noise leaves mostly rumble.
fn gen_low_bias(rng: &mut StdRng, n: usize, _sample_rate: u32) -> Vec<f64> {
    let mut out = Vec::with_capacity(n);
    let mut y = 0.0;
    for _ in 0..n {
        let x: f64 = rng.sample(StandardNormal);
        y = 0.95 * y + x;
        out.push(y);
    }
    out
}

/// White noise through a random FIR gives an uneven, seed-dependent spectrum.
fn gen_random_shape(rng: &mut StdRng, n: usize, _sample_rate: u32) -> Vec<f64> {
    let taps: Vec<f64> = (0..17).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let w = white(rng, n);
    let mut out = vec![0.0; n];
    for i in 0..n {
        let mut acc = 0.0;
        for (j, &tap) in taps.iter().enumerate() {
            if i >= j {
                acc += tap * w[i - j];
            }
        }
        out[i] = acc;
    }
    out
}

/// White noise under a slowly wandering envelope; the random-walk phase
/// makes the loudness swell and collapse in bubble-like bursts.
fn gen_bubble(rng: &mut StdRng, n: usize, _sample_rate: u32) -> Vec<f64> {
    let mut out = Vec::with_capacity(n);
    let mut phase = 0.0_f64;
    for _ in 0..n {
        let step: f64 = rng.sample(StandardNormal);
        phase += step * 0.02;
        let x: f64 = rng.sample(StandardNormal);
        out.push(x * phase.sin().abs());
    }
    out
}

/// A 50 Hz mains hum over a tiny noise floor; kept near-silent by its
/// archetype peak rather than here.
fn gen_device_hum(rng: &mut StdRng, n: usize, sample_rate: u32) -> Vec<f64> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 / sample_rate as f64;
        let floor: f64 = rng.sample(StandardNormal);
        out.push((2.0 * PI * 50.0 * t).sin() + 0.25 * floor);
    }
    out
}

/// Paul Kellett's economy pink noise filter (1/f within ~0.05 dB above
/// 9.2 Hz at 44.1 kHz, close enough at 16 kHz).
fn gen_pink(rng: &mut StdRng, n: usize, _sample_rate: u32) -> Vec<f64> {
    let (mut b0, mut b1, mut b2, mut b3, mut b4, mut b5, mut b6) =
        (0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let w: f64 = rng.sample(StandardNormal);
        b0 = 0.99886 * b0 + w * 0.0555179;
        b1 = 0.99332 * b1 + w * 0.0750759;
        b2 = 0.96900 * b2 + w * 0.1538520;
        b3 = 0.86650 * b3 + w * 0.3104856;
        b4 = 0.55000 * b4 + w * 0.5329522;
        b5 = -0.7616 * b5 - w * 0.0168980;
        out.push(b0 + b1 + b2 + b3 + b4 + b5 + b6 + w * 0.5362);
        b6 = w * 0.115926;
    }
    out
}

/// Two-pole resonator at 1.2 kHz concentrates white noise in a narrow band.
fn gen_bandpass(rng: &mut StdRng, n: usize, sample_rate: u32) -> Vec<f64> {
    let w0 = 2.0 * PI * 1200.0 / sample_rate as f64;
    let r = 0.99;
    let (a1, a2) = (2.0 * r * w0.cos(), -r * r);
    let (mut y1, mut y2) = (0.0, 0.0);
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let x: f64 = rng.sample(StandardNormal);
        let y = a1 * y1 + a2 * y2 + x;
        out.push(y);
        y2 = y1;
        y1 = y;
    }
    out
}

/// White noise with a 4 Hz amplitude modulation envelope.
fn gen_modulated(rng: &mut StdRng, n: usize, sample_rate: u32) -> Vec<f64> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 / sample_rate as f64;
        let env = 0.5 * (1.0 + (2.0 * PI * 4.0 * t).sin());
        let x: f64 = rng.sample(StandardNormal);
        out.push(x * env);
    }
    out
}

/// Silence broken by short random noise bursts with hard edges.
fn gen_glitch(rng: &mut StdRng, n: usize, _sample_rate: u32) -> Vec<f64> {
    let mut out = vec![0.0; n];
    for _ in 0..20 {
        let start = rng.gen_range(0..n);
        let len = rng.gen_range(50..400);
        for slot in out.iter_mut().skip(start).take(len) {
            *slot = rng.sample(StandardNormal);
        }
    }
    out
}

/// Scales `samples` so the largest magnitude lands at `peak`.
fn normalize_peak(mut samples: Vec<f64>, peak: f64) -> Vec<f64> {
    let max = samples.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
    if max > 0.0 {
        let scale = peak / max;
        for s in &mut samples {
            *s *= scale;
        }
    }
    samples
}

fn write_wav(path: &std::path::Path, samples: &[f64], sample_rate: u32) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in samples {
        let q = (s * 32767.0).round().clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(q)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_are_deterministic() {
        for archetype in &ARCHETYPES {
            let mut a = StdRng::seed_from_u64(7);
            let mut b = StdRng::seed_from_u64(7);
            let first = (archetype.generate)(&mut a, 1600, 16000);
            let second = (archetype.generate)(&mut b, 1600, 16000);
            assert_eq!(first, second, "{} not deterministic", archetype.file_name);
        }
    }

    #[test]
    fn test_normalize_peak_hits_target() {
        let samples = normalize_peak(vec![0.1, -0.4, 0.2], 0.9);
        let max = samples.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
        assert!((max - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_peak_leaves_silence_alone() {
        let samples = normalize_peak(vec![0.0; 8], 0.9);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_glitch_bursts_are_sparse() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples = gen_glitch(&mut rng, 16000, 16000);
        let nonzero = samples.iter().filter(|&&s| s != 0.0).count();
        assert!(nonzero > 0, "no bursts generated");
        assert!(nonzero < 16000 / 2, "bursts cover too much of the clip");
    }

    #[test]
    fn test_every_archetype_produces_audible_output() {
        for archetype in &ARCHETYPES {
            let mut rng = StdRng::seed_from_u64(11);
            let samples = (archetype.generate)(&mut rng, 1600, 16000);
            assert_eq!(samples.len(), 1600);
            assert!(
                samples.iter().any(|&s| s != 0.0),
                "{} generated pure silence",
                archetype.file_name
            );
        }
    }

    #[test]
    fn test_written_clips_load_and_encode() {
        use std::sync::Arc;

        use noisebank_audio::{AudioLoader, WavLoader};
        use noisebank_encoder::{Encoder, FbankExtractor};

        let dir = tempfile::tempdir().unwrap();
        let loader = WavLoader::new();
        let encoder = Encoder::new(Arc::new(FbankExtractor::new()));

        for archetype in &ARCHETYPES {
            let mut rng = StdRng::seed_from_u64(42);
            let samples = (archetype.generate)(&mut rng, 16000, 16000);
            let samples = normalize_peak(samples, archetype.peak);
            let path = dir.path().join(archetype.file_name);
            write_wav(&path, &samples, 16000).unwrap();

            let wav = loader.load(&path).unwrap();
            assert_eq!(wav.sample_rate(), 16000);
            assert_eq!(wav.len(), 16000);

            let embedding = encoder.encode(&wav).unwrap();
            assert_eq!(embedding.len(), 80, "{}", archetype.file_name);
            assert!(embedding.iter().all(|v| v.is_finite()));
        }
    }
}
