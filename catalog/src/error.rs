use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog: dimension mismatch: got {got}, want {want}")]
    DimensionMismatch { got: usize, want: usize },

    #[error("catalog: empty embedding")]
    EmptyEmbedding,

    #[error("catalog: index {index} out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },
}
