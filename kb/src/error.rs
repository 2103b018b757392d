use thiserror::Error;

#[derive(Error, Debug)]
pub enum KbError {
    #[error("kb: audio error: {0}")]
    Audio(String),

    #[error("kb: encode error: {0}")]
    Encode(String),

    #[error("kb: catalog error: {0}")]
    Catalog(String),

    #[error("kb: config error: {0}")]
    Config(String),

    #[error("kb: cancelled")]
    Cancelled,
}

impl From<noisebank_audio::AudioError> for KbError {
    fn from(e: noisebank_audio::AudioError) -> Self {
        KbError::Audio(e.to_string())
    }
}

impl From<noisebank_encoder::EncoderError> for KbError {
    fn from(e: noisebank_encoder::EncoderError) -> Self {
        KbError::Encode(e.to_string())
    }
}

impl From<noisebank_catalog::CatalogError> for KbError {
    fn from(e: noisebank_catalog::CatalogError) -> Self {
        KbError::Catalog(e.to_string())
    }
}
