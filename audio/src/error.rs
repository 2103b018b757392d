use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by audio loading and resampling.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio file not found: {0}")]
    NotFound(PathBuf),

    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("unsupported format in {path}: {detail}")]
    UnsupportedFormat { path: PathBuf, detail: String },

    #[error("audio file has no samples: {0}")]
    Empty(PathBuf),

    #[error("resample error: {0}")]
    Resample(String),

    #[error("io error: {0}")]
    Io(String),
}
