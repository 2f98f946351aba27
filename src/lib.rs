pub use measure::{Measure, SemanticContext, SemanticMeasure};
pub use table::ItemTable;

pub mod cluster;
pub mod error;
pub mod lexicon;
pub mod measure;
pub mod table;
pub mod tokenize;

/// A condensed pairwise distance matrix.
///
/// Stores the upper triangle (diagonal excluded) of the symmetric N×N
/// distance matrix over N items as a flat array, enumerated in row-major
/// order for i < j: (0,1), (0,2), …, (0,N-1), (1,2), …
///
/// # Invariant
///
/// `values.len() == items * (items - 1) / 2`, upheld by construction.
///
/// # Example
///
/// ```
/// use lexclust::{ItemTable, Measure};
/// use lexclust::measure::pairwise_distances;
///
/// let table = ItemTable::from_labels(vec!["coffee".into(), "tea".into()]);
/// let output = pairwise_distances(&table, Measure::Levenshtein, None).unwrap();
/// let matrix = output.into_condensed().unwrap();
/// assert_eq!(matrix.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedMatrix {
    /// Number of items the matrix was computed over.
    items: usize,

    /// The flattened upper triangle, row-major for i < j.
    values: Vec<f64>,
}

impl CondensedMatrix {
    /// Number of entries a condensed matrix over `items` items must have.
    pub fn expected_len(items: usize) -> usize {
        items * items.saturating_sub(1) / 2
    }

    pub(crate) fn new(items: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), Self::expected_len(items));
        CondensedMatrix { items, values }
    }

    /// Builds the matrix by evaluating `pair_value` for every (i, j), i < j,
    /// in row-major order.
    pub(crate) fn from_fn(items: usize, mut pair_value: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(Self::expected_len(items));
        for i in 0..items {
            for j in i + 1..items {
                values.push(pair_value(i, j));
            }
        }
        CondensedMatrix { items, values }
    }

    /// Fallible variant of [`CondensedMatrix::from_fn`].
    pub(crate) fn try_from_fn<E>(
        items: usize,
        mut pair_value: impl FnMut(usize, usize) -> Result<f64, E>,
    ) -> Result<Self, E> {
        let mut values = Vec::with_capacity(Self::expected_len(items));
        for i in 0..items {
            for j in i + 1..items {
                values.push(pair_value(i, j)?);
            }
        }
        Ok(CondensedMatrix { items, values })
    }

    /// Number of items the matrix covers.
    pub fn items(&self) -> usize {
        self.items
    }

    /// Number of stored pairwise values, always `items * (items - 1) / 2`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distance between items `i` and `j` (symmetric; 0 on the diagonal).
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.items && j < self.items, "item index out of range");
        if i == j {
            return 0.0;
        }
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        let index = i * (2 * self.items - i - 1) / 2 + (j - i - 1);
        self.values[index]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Result of the distance engine.
///
/// The euclidean measure produces no matrix on purpose: the clustering step
/// computes euclidean distances itself, since some linkage strategies need
/// raw coordinates rather than a precomputed matrix. That case is a tagged
/// variant here instead of a null-like sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceOutput {
    /// A condensed distance matrix over all item pairs.
    Condensed(CondensedMatrix),

    /// No matrix produced; the caller computes euclidean distances downstream.
    Deferred,
}

impl DistanceOutput {
    /// The condensed matrix, if one was produced.
    pub fn into_condensed(self) -> Option<CondensedMatrix> {
        match self {
            DistanceOutput::Condensed(matrix) => Some(matrix),
            DistanceOutput::Deferred => None,
        }
    }
}
