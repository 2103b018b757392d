//! Noise exemplar knowledge base.
//!
//! # Architecture
//!
//! [`KnowledgeBase`] glues the three lower layers together:
//!
//! 1. `noisebank-audio`: WAV file -> mono 16 kHz [`Waveform`](noisebank_audio::Waveform)
//! 2. `noisebank-encoder`: waveform -> pooled embedding
//! 3. `noisebank-catalog`: embeddings -> deterministic top-k retrieval
//!
//! [`KnowledgeBase::build`] encodes an exemplar list concurrently while
//! preserving list order, all or nothing. Queries and appends run after
//! construction; every audio-touching operation has a `_cancellable`
//! variant driven by a `CancellationToken`.

mod config;
mod error;
mod kb;

pub use config::{load_exemplar_specs, BuildOptions};
pub use error::KbError;
pub use kb::KnowledgeBase;
