use thiserror::Error;

/// Errors returned by feature extraction and encoding.
#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("empty waveform")]
    EmptyWaveform,

    #[error("unsupported sample rate: got {got}, want {want}")]
    SampleRate { got: u32, want: u32 },

    #[error("feature matrix has no frames")]
    NoFrames,

    #[error("feature frames have no channels")]
    NoChannels,

    #[error("ragged feature matrix: frame {frame} has {got} channels, want {want}")]
    RaggedFrames {
        frame: usize,
        got: usize,
        want: usize,
    },

    #[error("validity mask length {mask} does not match {frames} frames")]
    MaskLength { mask: usize, frames: usize },

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("model error: {0}")]
    Model(String),
}
