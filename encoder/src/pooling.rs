use crate::features::FeatureFrames;

/// Collapses a feature matrix into one vector by averaging valid frames.
///
/// Each output channel is the sum over frames the mask marks valid,
/// divided by the valid-frame count. The divisor is clamped to at least 1,
/// so a matrix with no valid frames pools to the zero vector rather than
/// dividing by zero. Accumulation runs in f64.
pub fn masked_mean(frames: &FeatureFrames) -> Vec<f32> {
    let dim = frames.dimension();
    let mut acc = vec![0.0f64; dim];
    let mut count = 0usize;

    for (frame, &ok) in frames.frames().iter().zip(frames.validity()) {
        if !ok {
            continue;
        }
        for (a, &v) in acc.iter_mut().zip(frame) {
            *a += v as f64;
        }
        count += 1;
    }

    let divisor = count.max(1) as f64;
    acc.into_iter().map(|a| (a / divisor) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_excludes_invalid_frames() {
        // Three frames, last one is padding: result averages the first two.
        let frames = FeatureFrames::new(
            vec![vec![1.0, 10.0], vec![3.0, 20.0], vec![100.0, 100.0]],
            vec![true, true, false],
        )
        .unwrap();
        let pooled = masked_mean(&frames);
        assert_eq!(pooled, vec![2.0, 15.0]);
    }

    #[test]
    fn test_all_valid_is_plain_mean() {
        let frames =
            FeatureFrames::all_valid(vec![vec![0.0, 4.0], vec![2.0, 8.0]]).unwrap();
        assert_eq!(masked_mean(&frames), vec![1.0, 6.0]);
    }

    #[test]
    fn test_no_valid_frames_pools_to_zero() {
        let frames = FeatureFrames::new(
            vec![vec![5.0, 5.0], vec![7.0, 7.0]],
            vec![false, false],
        )
        .unwrap();
        assert_eq!(masked_mean(&frames), vec![0.0, 0.0]);
    }

    #[test]
    fn test_single_frame() {
        let frames = FeatureFrames::all_valid(vec![vec![-1.5, 2.5, 0.0]]).unwrap();
        assert_eq!(masked_mean(&frames), vec![-1.5, 2.5, 0.0]);
    }

    #[test]
    fn test_output_dimension_matches_input() {
        let frames = FeatureFrames::all_valid(vec![vec![0.25; 80]; 10]).unwrap();
        let pooled = masked_mean(&frames);
        assert_eq!(pooled.len(), 80);
        assert!(pooled.iter().all(|&v| (v - 0.25).abs() < 1e-6));
    }
}
