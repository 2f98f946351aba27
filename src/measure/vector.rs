//! Vector distance measures.

use crate::CondensedMatrix;

/// Upper bound of the cosine clamping band.
///
/// True cosine distance lies in [0, 2]; the band is intentionally much wider
/// and only exists to squash small negative floating-point artifacts to 0.
/// Kept at this exact value for compatibility with existing outputs.
const COSINE_CLAMP_MAX: f64 = 1000.0;

/// Pairwise cosine distances (1 - cosine similarity), each value clamped
/// into [0, `COSINE_CLAMP_MAX`].
///
/// Callers have already validated that all vectors share one nonzero length.
pub(crate) fn cosine_matrix(vectors: &[Vec<f64>]) -> CondensedMatrix {
    CondensedMatrix::from_fn(vectors.len(), |i, j| {
        cosine_distance(&vectors[i], &vectors[j])
    })
}

/// Pairwise euclidean distances, computed on behalf of the clustering step.
pub(crate) fn euclidean_matrix(vectors: &[Vec<f64>]) -> CondensedMatrix {
    CondensedMatrix::from_fn(vectors.len(), |i, j| {
        euclidean_distance(&vectors[i], &vectors[j])
    })
}

fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    // A zero vector is orthogonal to everything: similarity 0, distance 1.
    let similarity = if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    };

    (1.0 - similarity).clamp(0.0, COSINE_CLAMP_MAX)
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
