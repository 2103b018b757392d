use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use noisebank_audio::AudioLoader;
use noisebank_catalog::{Catalog, ExemplarRecord, ExemplarSpec, QueryResult};
use noisebank_encoder::{Encoder, FeatureExtractor};

use crate::config::BuildOptions;
use crate::error::KbError;

/// A noise exemplar knowledge base: one loader, one encoder, one catalog.
///
/// Built once from an exemplar list, then queried concurrently; single
/// exemplars can be appended later. All audio work runs on blocking
/// threads so async callers never stall on decoding or FFTs.
pub struct KnowledgeBase {
    loader: Arc<dyn AudioLoader>,
    encoder: Encoder,
    catalog: Catalog,
}

impl std::fmt::Debug for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeBase").finish_non_exhaustive()
    }
}

impl KnowledgeBase {
    /// Creates an empty knowledge base around a loader and extractor.
    pub fn new(loader: Arc<dyn AudioLoader>, extractor: Arc<dyn FeatureExtractor>) -> Self {
        Self {
            loader,
            encoder: Encoder::new(extractor),
            catalog: Catalog::new(),
        }
    }

    /// Encodes every exemplar in `specs` and builds a fresh knowledge base.
    ///
    /// Clips are encoded concurrently, bounded by `opts.concurrency`, but
    /// the catalog keeps the order of `specs`. The build is all or nothing:
    /// one failed clip fails the whole build. Cancellation aborts with
    /// [`KbError::Cancelled`]; encode tasks already running finish on their
    /// blocking threads and their results are dropped.
    pub async fn build(
        loader: Arc<dyn AudioLoader>,
        extractor: Arc<dyn FeatureExtractor>,
        specs: &[ExemplarSpec],
        opts: BuildOptions,
    ) -> Result<Self, KbError> {
        let started = Instant::now();
        let encoder = Encoder::new(extractor);
        let cancel = opts.cancel.clone();
        let concurrency = opts.concurrency.max(1);

        let mut slots: Vec<Option<ExemplarRecord>> = (0..specs.len()).map(|_| None).collect();
        {
            let jobs = specs.iter().cloned().enumerate().map(|(index, spec)| {
                let loader = loader.clone();
                let encoder = encoder.clone();
                async move {
                    let result = encode_clip(loader, encoder, spec.clone()).await;
                    (index, spec, result)
                }
            });
            let mut results = stream::iter(jobs).buffer_unordered(concurrency);

            loop {
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(KbError::Cancelled),
                    item = results.next() => item,
                };
                let Some((index, spec, result)) = next else { break };
                match result {
                    Ok(record) => {
                        debug!("encoded exemplar {}: {}", index, spec.source_path);
                        slots[index] = Some(record);
                    }
                    Err(e) => {
                        warn!("exemplar {} failed: {}: {}", index, spec.source_path, e);
                        return Err(e);
                    }
                }
            }
        }

        let mut records = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(record) => records.push(record),
                None => {
                    return Err(KbError::Encode(format!(
                        "exemplar {index} produced no record"
                    )));
                }
            }
        }

        let catalog = Catalog::from_records(records)?;
        info!(
            "knowledge base built: {} exemplars, dim {}, took {:?}",
            catalog.len(),
            catalog.dimension().unwrap_or(0),
            started.elapsed()
        );
        Ok(Self {
            loader,
            encoder,
            catalog,
        })
    }

    /// Encodes a query clip into an embedding without touching the catalog.
    pub async fn encode_query(&self, path: &Path) -> Result<Vec<f32>, KbError> {
        self.encode_query_cancellable(path, CancellationToken::new())
            .await
    }

    /// Encodes a query clip, returning [`KbError::Cancelled`] if `cancel`
    /// fires first.
    pub async fn encode_query_cancellable(
        &self,
        path: &Path,
        cancel: CancellationToken,
    ) -> Result<Vec<f32>, KbError> {
        let job = encode_file(
            self.loader.clone(),
            self.encoder.clone(),
            path.to_path_buf(),
        );
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(KbError::Cancelled),
            result = job => result,
        }
    }

    /// Ranks the catalog against an already-encoded query embedding.
    pub fn retrieve(&self, query: &[f32], k: usize) -> Result<Vec<QueryResult>, KbError> {
        Ok(self.catalog.retrieve(query, k)?)
    }

    /// Encodes the clip at `path` and retrieves its top-k neighbors.
    pub async fn retrieve_path(
        &self,
        path: &Path,
        k: usize,
    ) -> Result<Vec<QueryResult>, KbError> {
        let embedding = self.encode_query(path).await?;
        self.retrieve(&embedding, k)
    }

    /// Encodes one clip and appends it at the end of the catalog.
    ///
    /// Nothing is appended on failure; concurrent retrievals see the
    /// catalog either without or with the finished record.
    pub async fn add_exemplar(&self, spec: ExemplarSpec) -> Result<(), KbError> {
        self.add_exemplar_cancellable(spec, CancellationToken::new())
            .await
    }

    /// [`KnowledgeBase::add_exemplar`] with cooperative cancellation.
    pub async fn add_exemplar_cancellable(
        &self,
        spec: ExemplarSpec,
        cancel: CancellationToken,
    ) -> Result<(), KbError> {
        let source_path = spec.source_path.clone();
        let job = encode_clip(self.loader.clone(), self.encoder.clone(), spec);
        let record = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(KbError::Cancelled),
            result = job => match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("append failed: {}: {}", source_path, e);
                    return Err(e);
                }
            },
        };
        if let Err(e) = self.catalog.append(record) {
            warn!("append failed: {}: {}", source_path, e);
            return Err(e.into());
        }
        debug!("appended exemplar: {}", source_path);
        Ok(())
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Embedding dimension of the configured extractor.
    pub fn dimension(&self) -> usize {
        self.encoder.dimension()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

/// Loads and encodes one file on a blocking thread.
async fn encode_file(
    loader: Arc<dyn AudioLoader>,
    encoder: Encoder,
    path: PathBuf,
) -> Result<Vec<f32>, KbError> {
    let join = tokio::task::spawn_blocking(move || -> Result<Vec<f32>, KbError> {
        let wav = loader.load(&path)?;
        Ok(encoder.encode(&wav)?)
    });
    join.await
        .map_err(|e| KbError::Encode(format!("encode task panicked: {e}")))?
}

async fn encode_clip(
    loader: Arc<dyn AudioLoader>,
    encoder: Encoder,
    spec: ExemplarSpec,
) -> Result<ExemplarRecord, KbError> {
    let embedding = encode_file(loader, encoder, PathBuf::from(&spec.source_path)).await?;
    Ok(ExemplarRecord {
        source_path: spec.source_path,
        caption: spec.caption,
        embedding,
    })
}
