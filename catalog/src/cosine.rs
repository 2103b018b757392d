/// Norm floor: an all-zero embedding scores 0 instead of dividing by zero.
const NORM_EPSILON: f64 = 1e-12;

/// Compute the cosine similarity between two vectors.
///
/// Returns a value in `[-1, 1]` where 1 means identical direction and
/// -1 means opposite direction.
///
/// Uses f64 intermediate precision; the result is clamped to `[-1, 1]`
/// to absorb floating point error. Callers are responsible for passing
/// equal-length vectors; excess elements of the longer vector are ignored.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let xi = x as f64;
        let yi = y as f64;
        dot += xi * yi;
        norm_a += xi * xi;
        norm_b += yi * yi;
    }

    let denom = (norm_a.sqrt() * norm_b.sqrt()).max(NORM_EPSILON);
    (dot / denom).clamp(-1.0, 1.0) as f32
}
