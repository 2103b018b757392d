use std::cmp::Ordering;
use std::sync::RwLock;

use crate::cosine::cosine_similarity;
use crate::error::CatalogError;
use crate::types::{ExemplarRecord, QueryResult};

/// In-memory, insertion-ordered store of encoded exemplars.
///
/// Intended for tens to a few hundred records; retrieval is a brute-force
/// scan. Reads take a shared lock and see a consistent snapshot; appends
/// take the write lock, so a record is either fully visible or not yet
/// visible, never partially. The embedding dimension is fixed by the
/// first record and enforced on every later append.
#[derive(Debug)]
pub struct Catalog {
    inner: RwLock<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    records: Vec<ExemplarRecord>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                records: Vec::new(),
            }),
        }
    }

    /// Creates a catalog from already-encoded records.
    ///
    /// Validates that every embedding is non-empty and that all records
    /// share one dimension. Insertion order is the order of `records`.
    pub fn from_records(records: Vec<ExemplarRecord>) -> Result<Self, CatalogError> {
        let mut validated: Vec<ExemplarRecord> = Vec::with_capacity(records.len());
        for record in records {
            check_dimension(validated.first(), &record)?;
            validated.push(record);
        }
        Ok(Self {
            inner: RwLock::new(CatalogInner { records: validated }),
        })
    }

    /// Appends one record at the end of the insertion order.
    pub fn append(&self, record: ExemplarRecord) -> Result<(), CatalogError> {
        let mut inner = self.inner.write().unwrap();
        check_dimension(inner.records.first(), &record)?;
        inner.records.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().records.is_empty()
    }

    /// Embedding dimension shared by all records, or `None` while empty.
    pub fn dimension(&self) -> Option<usize> {
        self.inner
            .read()
            .unwrap()
            .records
            .first()
            .map(|r| r.embedding.len())
    }

    /// Returns a copy of the record at `index` in insertion order.
    pub fn record_at(&self, index: usize) -> Result<ExemplarRecord, CatalogError> {
        let inner = self.inner.read().unwrap();
        inner
            .records
            .get(index)
            .cloned()
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: inner.records.len(),
            })
    }

    /// Returns a snapshot of all records in insertion order.
    pub fn records(&self) -> Vec<ExemplarRecord> {
        self.inner.read().unwrap().records.clone()
    }

    /// Ranks every record against `query` and returns the top `k`.
    ///
    /// Results are ordered by similarity descending; equal similarities
    /// keep insertion order. An empty catalog returns an empty list for
    /// any query. `k` larger than the catalog is silently capped, and
    /// `k == 0` returns an empty list. The scan holds the read lock, so
    /// the ranking reflects one consistent snapshot.
    pub fn retrieve(&self, query: &[f32], k: usize) -> Result<Vec<QueryResult>, CatalogError> {
        let inner = self.inner.read().unwrap();
        if inner.records.is_empty() {
            return Ok(vec![]);
        }

        let want = inner.records[0].embedding.len();
        if query.len() != want {
            return Err(CatalogError::DimensionMismatch {
                got: query.len(),
                want,
            });
        }
        if k == 0 {
            return Ok(vec![]);
        }

        let mut scored: Vec<(usize, f32)> = inner
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (i, cosine_similarity(query, &r.embedding)))
            .collect();

        // Similarity descending, ties resolved by insertion index so the
        // ranking is reproducible byte for byte.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k.min(inner.records.len()));

        Ok(scored
            .into_iter()
            .map(|(i, similarity)| {
                let r = &inner.records[i];
                QueryResult {
                    source_path: r.source_path.clone(),
                    caption: r.caption.clone(),
                    similarity,
                }
            })
            .collect())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn check_dimension(
    first: Option<&ExemplarRecord>,
    record: &ExemplarRecord,
) -> Result<(), CatalogError> {
    if record.embedding.is_empty() {
        return Err(CatalogError::EmptyEmbedding);
    }
    if let Some(first) = first {
        let want = first.embedding.len();
        if record.embedding.len() != want {
            return Err(CatalogError::DimensionMismatch {
                got: record.embedding.len(),
                want,
            });
        }
    }
    Ok(())
}
