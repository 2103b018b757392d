use noisebank_audio::Waveform;

use crate::error::EncoderError;
use crate::features::FeatureFrames;

/// Extracts per-frame acoustic features from a mono waveform.
///
/// The output is a `(frames, channels)` matrix plus a validity mask;
/// pooling collapses it into one embedding per clip. Implementations
/// declare their channel count up front via [`FeatureExtractor::dimension`]
/// so catalogs can be sized before any audio is seen.
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use; catalog builds call
/// `extract` from several tasks at once through one shared instance.
pub trait FeatureExtractor: Send + Sync {
    /// Computes the feature matrix for one clip.
    ///
    /// The waveform is guaranteed non-empty by the caller. Implementations
    /// must return at least one frame, padding internally if the clip is
    /// shorter than their analysis window.
    fn extract(&self, wav: &Waveform) -> Result<FeatureFrames, EncoderError>;

    /// Returns the number of feature channels per frame.
    fn dimension(&self) -> usize;
}
