use serde::{Deserialize, Serialize};

/// One entry of an exemplar list: a clip on disk and what it sounds like.
///
/// This is the configuration-facing shape; encoding turns it into an
/// [`ExemplarRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemplarSpec {
    /// Path of the audio clip.
    pub source_path: String,
    /// Human-readable description of the noise.
    pub caption: String,
}

/// One encoded catalog entry.
///
/// Embeddings live only in memory; records are rebuilt from their source
/// clips rather than persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ExemplarRecord {
    /// Path the embedding was computed from.
    pub source_path: String,
    /// Human-readable description of the noise.
    pub caption: String,
    /// Pooled embedding vector.
    pub embedding: Vec<f32>,
}

/// A single ranked retrieval hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Source path of the matched exemplar.
    pub source_path: String,
    /// Caption of the matched exemplar.
    pub caption: String,
    /// Cosine similarity to the query, in `[-1, 1]`.
    pub similarity: f32,
}
