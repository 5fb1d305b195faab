/// Normalizes `v` to unit L2 length in place.
///
/// Uses f64 intermediate precision. A zero vector is left unchanged; its
/// inner product with anything is 0, which ranks it last naturally.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f64 = v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt();
    if norm > 0.0 {
        let scale = (1.0 / norm) as f32;
        for x in v.iter_mut() {
            *x *= scale;
        }
    }
}

/// Inner product of two equal-length vectors, f64 accumulator.
///
/// For unit vectors this is the cosine similarity in `[-1, 1]`.
pub fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot: f64 = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += (x as f64) * (y as f64);
    }
    dot as f32
}

/// Maps a cosine similarity in `[-1, 1]` to a display percentage in `[0, 100]`.
pub fn score_percent(score: f32) -> f32 {
    ((score + 1.0) / 2.0 * 100.0).clamp(0.0, 100.0)
}
