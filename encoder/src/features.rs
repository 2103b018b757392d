use crate::error::EncoderError;

/// A per-frame feature matrix with a validity mask.
///
/// Row `t` holds the feature channels of frame `t`; `validity()[t]` is
/// false for frames that only exist as padding and must not contribute
/// to pooling. Construction validates shape: at least one frame, at
/// least one channel, uniform row width, mask length equal to the
/// frame count.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrames {
    frames: Vec<Vec<f32>>,
    valid: Vec<bool>,
}

impl FeatureFrames {
    /// Wraps a feature matrix together with its validity mask.
    pub fn new(frames: Vec<Vec<f32>>, valid: Vec<bool>) -> Result<Self, EncoderError> {
        if frames.is_empty() {
            return Err(EncoderError::NoFrames);
        }
        let want = frames[0].len();
        if want == 0 {
            return Err(EncoderError::NoChannels);
        }
        for (i, frame) in frames.iter().enumerate() {
            if frame.len() != want {
                return Err(EncoderError::RaggedFrames {
                    frame: i,
                    got: frame.len(),
                    want,
                });
            }
        }
        if valid.len() != frames.len() {
            return Err(EncoderError::MaskLength {
                mask: valid.len(),
                frames: frames.len(),
            });
        }
        Ok(Self { frames, valid })
    }

    /// Wraps a feature matrix in which every frame is real (no padding).
    pub fn all_valid(frames: Vec<Vec<f32>>) -> Result<Self, EncoderError> {
        let valid = vec![true; frames.len()];
        Self::new(frames, valid)
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Feature channels per frame.
    pub fn dimension(&self) -> usize {
        self.frames[0].len()
    }

    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    pub fn validity(&self) -> &[bool] {
        &self.valid
    }

    /// Number of frames the mask marks as real.
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }
}
