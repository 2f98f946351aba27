//! Edit-distance measures over item labels.

use crate::CondensedMatrix;
use strsim::levenshtein;

/// Pairwise edit distances between all labels.
///
/// With `zero_on_containment`, a pair where one label is a literal substring
/// of the other gets distance 0 regardless of its edit distance, so a word
/// and its compound form cluster as identical. The substring test is
/// case-sensitive.
pub(crate) fn matrix(labels: &[String], zero_on_containment: bool) -> CondensedMatrix {
    CondensedMatrix::from_fn(labels.len(), |i, j| {
        distance(&labels[i], &labels[j], zero_on_containment)
    })
}

fn distance(a: &str, b: &str, zero_on_containment: bool) -> f64 {
    if zero_on_containment && (a.contains(b) || b.contains(a)) {
        return 0.0;
    }
    levenshtein(a, b) as f64
}
