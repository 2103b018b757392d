//! Acoustic feature extraction and embedding pooling for noise clips.
//!
//! # Architecture
//!
//! Encoding runs in three stages:
//!
//! 1. [`FeatureExtractor::extract`]: mono waveform -> `(frames, channels)`
//!    feature matrix with a validity mask
//! 2. [`masked_mean`]: feature matrix -> one vector, averaging only the
//!    frames the mask marks valid
//! 3. [`Encoder::encode`]: the two stages glued together, with shape and
//!    dimension checks at the seams
//!
//! [`FbankExtractor`] is the built-in extractor: Kaldi-style log mel
//! filterbank energies (Povey window, pre-emphasis 0.97, Cooley-Tukey FFT,
//! triangular mel bank). Any model-backed extractor can stand in for it by
//! implementing [`FeatureExtractor`]; the rest of the pipeline only sees
//! the trait.

mod encoder;
mod error;
mod extractor;
pub mod fbank;
mod features;
mod pooling;

pub use encoder::Encoder;
pub use error::EncoderError;
pub use extractor::FeatureExtractor;
pub use fbank::{compute_fbank, FbankConfig, FbankExtractor};
pub use features::FeatureFrames;
pub use pooling::masked_mean;
