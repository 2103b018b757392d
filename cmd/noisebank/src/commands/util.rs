//! Utility functions for CLI commands.

use std::path::Path;
use std::sync::Arc;

use noisebank_audio::{AudioLoader, WavLoader};
use noisebank_encoder::{FbankExtractor, FeatureExtractor};
use noisebank_kb::{load_exemplar_specs, BuildOptions, KnowledgeBase};

/// Builds a knowledge base from an exemplar list file using the default
/// WAV loader and fbank extractor.
pub async fn build_kb(exemplars: &Path, concurrency: usize) -> anyhow::Result<KnowledgeBase> {
    let specs = load_exemplar_specs(exemplars)?;
    let loader: Arc<dyn AudioLoader> = Arc::new(WavLoader::new());
    let extractor: Arc<dyn FeatureExtractor> = Arc::new(FbankExtractor::new());
    let options = BuildOptions {
        concurrency,
        ..BuildOptions::default()
    };
    let kb = KnowledgeBase::build(loader, extractor, &specs, options).await?;
    Ok(kb)
}
