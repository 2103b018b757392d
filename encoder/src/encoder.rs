use std::sync::Arc;

use noisebank_audio::Waveform;

use crate::error::EncoderError;
use crate::extractor::FeatureExtractor;
use crate::pooling::masked_mean;

/// Turns waveforms into fixed-length embeddings.
///
/// Wraps a [`FeatureExtractor`] and pools its per-frame output with masked
/// mean pooling. The embedding dimension equals the extractor's declared
/// channel count; `encode` verifies the extractor honors its declaration.
#[derive(Clone)]
pub struct Encoder {
    extractor: Arc<dyn FeatureExtractor>,
}

impl Encoder {
    pub fn new(extractor: Arc<dyn FeatureExtractor>) -> Self {
        Self { extractor }
    }

    /// Embedding dimension, fixed for the life of the encoder.
    pub fn dimension(&self) -> usize {
        self.extractor.dimension()
    }

    /// Encodes one clip into an embedding.
    pub fn encode(&self, wav: &Waveform) -> Result<Vec<f32>, EncoderError> {
        if wav.is_empty() {
            return Err(EncoderError::EmptyWaveform);
        }
        let frames = self.extractor.extract(wav)?;
        let expected = self.extractor.dimension();
        if frames.dimension() != expected {
            return Err(EncoderError::DimensionMismatch {
                expected,
                got: frames.dimension(),
            });
        }
        Ok(masked_mean(&frames))
    }

    /// Encodes several clips, stopping at the first failure.
    pub fn encode_batch(&self, wavs: &[Waveform]) -> Result<Vec<Vec<f32>>, EncoderError> {
        wavs.iter().map(|w| self.encode(w)).collect()
    }
}
