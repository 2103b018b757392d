//! In-memory exemplar catalog with deterministic cosine retrieval.
//!
//! A [`Catalog`] holds encoded noise exemplars in insertion order and
//! answers top-k queries by brute-force cosine similarity. Ranking is
//! fully deterministic: similarity descending, ties broken by insertion
//! index. Appends and reads share a reader-writer lock, so retrievals
//! always see a consistent snapshot.
//!
//! Sized for tens to a few hundred exemplars; there is deliberately no
//! approximate index behind this API.

mod catalog;
mod cosine;
mod error;
mod types;

pub use catalog::Catalog;
pub use cosine::cosine_similarity;
pub use error::CatalogError;
pub use types::{ExemplarRecord, ExemplarSpec, QueryResult};
