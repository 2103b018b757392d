use std::io::ErrorKind;
use std::path::Path;

use hound::SampleFormat;

use crate::error::AudioError;

/// Decodes a WAV file into interleaved float samples.
///
/// Returns `(samples, channels, sample_rate)`. PCM16 is scaled to
/// `[-1.0, 1.0)`; 32-bit float is passed through unchanged.
pub(crate) fn read_wav(path: &Path) -> Result<(Vec<f32>, u16, u32), AudioError> {
    let mut reader = hound::WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(ref io) if io.kind() == ErrorKind::NotFound => {
            AudioError::NotFound(path.to_path_buf())
        }
        other => AudioError::Decode {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(AudioError::Decode {
            path: path.to_path_buf(),
            reason: "header claims zero sample rate".to_string(),
        });
    }

    let samples: Result<Vec<f32>, hound::Error> = match (spec.sample_format, spec.bits_per_sample)
    {
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect(),
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect(),
        (format, bits) => {
            return Err(AudioError::UnsupportedFormat {
                path: path.to_path_buf(),
                detail: format!("{bits}-bit {format:?}"),
            });
        }
    };

    let samples = samples.map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok((samples, spec.channels, spec.sample_rate))
}
