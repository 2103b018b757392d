use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use noisebank_audio::Waveform;
use noisebank_encoder::{compute_fbank, Encoder, FbankConfig, FbankExtractor};

fn make_sine(freq_hz: f64, n_samples: usize, sample_rate: u32) -> Waveform {
    let samples: Vec<f32> = (0..n_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (0.5 * (freq_hz * 2.0 * std::f64::consts::PI * t).sin()) as f32
        })
        .collect();
    Waveform::new(samples, sample_rate)
}

fn bench_fbank_400ms(c: &mut Criterion) {
    let cfg = FbankConfig::default();
    let wav = make_sine(440.0, 6400, 16000);

    c.bench_function("encoder_fbank_400ms", |b| {
        b.iter(|| {
            let _ = black_box(compute_fbank(black_box(wav.samples()), &cfg));
        });
    });
}

fn bench_fbank_1s(c: &mut Criterion) {
    let cfg = FbankConfig::default();
    let wav = make_sine(440.0, 16000, 16000);

    c.bench_function("encoder_fbank_1s", |b| {
        b.iter(|| {
            let _ = black_box(compute_fbank(black_box(wav.samples()), &cfg));
        });
    });
}

fn bench_encode_1s(c: &mut Criterion) {
    let encoder = Encoder::new(Arc::new(FbankExtractor::new()));
    let wav = make_sine(440.0, 16000, 16000);

    c.bench_function("encoder_encode_1s", |b| {
        b.iter(|| {
            let _ = black_box(encoder.encode(black_box(&wav)));
        });
    });
}

criterion_group!(benches, bench_fbank_400ms, bench_fbank_1s, bench_encode_1s);
criterion_main!(benches);
