//! Distance measure selection and the top-level pairwise dispatch.

mod edit;
mod semantic;
mod vector;

pub use semantic::{phrase_similarity, SemanticContext};

use crate::error::DistanceError;
use crate::table::ItemTable;
use crate::{CondensedMatrix, DistanceOutput};
use std::fmt;
use std::str::FromStr;

/// All supported distance measures.
///
/// Parsed from the method names the input format uses; an unknown name is an
/// explicit [`DistanceError::UnknownMeasure`], never a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Character-level edit distance between labels.
    Levenshtein,
    /// Edit distance, forced to 0 when one label is a substring of the other,
    /// e.g. "coffee" and "coffeemaker" or "coffee" and "coffee maker".
    LevenshteinContainment,
    /// No matrix is produced; the clustering step computes euclidean
    /// distances from the raw vectors itself.
    Euclidean,
    /// Cosine vector distance (1 - cosine similarity).
    Cosine,
    /// WordNet-based semantic distance over labels.
    Semantic(SemanticMeasure),
}

/// The WordNet synset-similarity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticMeasure {
    /// Shortest taxonomy path, range [0, 1].
    Path,
    /// Wu-Palmer, range [0, 1].
    Wup,
    /// Leacock-Chodorow, unbounded positive.
    Lch,
    /// Resnik, information-content based, unbounded non-negative.
    Res,
    /// Lin, information-content based, range [0, 1].
    Lin,
    /// Jiang-Conrath, information-content based, unbounded non-negative.
    Jcn,
}

impl SemanticMeasure {
    /// Whether the measure needs a corpus-derived information-content model.
    pub fn requires_ic(self) -> bool {
        matches!(
            self,
            SemanticMeasure::Res | SemanticMeasure::Lin | SemanticMeasure::Jcn
        )
    }
}

impl FromStr for Measure {
    type Err = DistanceError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "levenshtein" => Ok(Measure::Levenshtein),
            "levenshtein2" => Ok(Measure::LevenshteinContainment),
            "euclidean" => Ok(Measure::Euclidean),
            "cosine" => Ok(Measure::Cosine),
            "WordNet_path" => Ok(Measure::Semantic(SemanticMeasure::Path)),
            "WordNet_wup" => Ok(Measure::Semantic(SemanticMeasure::Wup)),
            "WordNet_lch" => Ok(Measure::Semantic(SemanticMeasure::Lch)),
            "WordNet_res" => Ok(Measure::Semantic(SemanticMeasure::Res)),
            "WordNet_lin" => Ok(Measure::Semantic(SemanticMeasure::Lin)),
            "WordNet_jcn" => Ok(Measure::Semantic(SemanticMeasure::Jcn)),
            _ => Err(DistanceError::UnknownMeasure(name.to_string())),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Measure::Levenshtein => "levenshtein",
            Measure::LevenshteinContainment => "levenshtein2",
            Measure::Euclidean => "euclidean",
            Measure::Cosine => "cosine",
            Measure::Semantic(SemanticMeasure::Path) => "WordNet_path",
            Measure::Semantic(SemanticMeasure::Wup) => "WordNet_wup",
            Measure::Semantic(SemanticMeasure::Lch) => "WordNet_lch",
            Measure::Semantic(SemanticMeasure::Res) => "WordNet_res",
            Measure::Semantic(SemanticMeasure::Lin) => "WordNet_lin",
            Measure::Semantic(SemanticMeasure::Jcn) => "WordNet_jcn",
        };
        f.write_str(name)
    }
}

/// Computes the condensed pairwise distance array for all C(N, 2) unordered
/// item pairs, enumerated for i in [0, N) and j in (i, N).
///
/// Semantic measures need a [`SemanticContext`]; every other measure ignores
/// it. The euclidean measure performs no computation and yields
/// [`DistanceOutput::Deferred`].
pub fn pairwise_distances(
    table: &ItemTable,
    measure: Measure,
    semantics: Option<&SemanticContext<'_>>,
) -> Result<DistanceOutput, DistanceError> {
    let matrix = match measure {
        Measure::Levenshtein => edit::matrix(table.labels(), false),
        Measure::LevenshteinContainment => edit::matrix(table.labels(), true),
        Measure::Euclidean => return Ok(DistanceOutput::Deferred),
        Measure::Cosine => vector::cosine_matrix(checked_vectors(table, measure)?),
        Measure::Semantic(semantic) => {
            let context = semantics.ok_or(DistanceError::MissingLexicon { measure })?;
            semantic::distance_matrix(table.labels(), semantic, context)?
        }
    };
    Ok(DistanceOutput::Condensed(matrix))
}

/// Condensed euclidean distances over the table's vectors.
///
/// This is the downstream half of the [`DistanceOutput::Deferred`] contract:
/// the engine never computes euclidean distances, the clustering driver does.
pub fn euclidean_distances(table: &ItemTable) -> Result<CondensedMatrix, DistanceError> {
    Ok(vector::euclidean_matrix(checked_vectors(
        table,
        Measure::Euclidean,
    )?))
}

fn checked_vectors<'a>(
    table: &'a ItemTable,
    measure: Measure,
) -> Result<&'a [Vec<f64>], DistanceError> {
    let vectors = table.vectors();
    let expected = vectors.first().map_or(0, Vec::len);
    if expected == 0 {
        return Err(DistanceError::MissingVectors { measure });
    }
    for (index, vector) in vectors.iter().enumerate() {
        if vector.len() != expected {
            return Err(DistanceError::DimensionMismatch {
                index,
                expected,
                actual: vector.len(),
            });
        }
    }
    Ok(vectors)
}
