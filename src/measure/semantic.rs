//! WordNet-based semantic distances between words and phrases.

use crate::error::DistanceError;
use crate::lexicon::{IcModel, Lexicon, SynsetId};
use crate::measure::{Measure, SemanticMeasure};
use crate::tokenize;
use crate::CondensedMatrix;

/// Everything a semantic measure needs besides the labels themselves.
///
/// The lexicon and the information-content model are loaded once at startup
/// and queried read-only; they are passed in explicitly so the engine works
/// without process-wide setup.
#[derive(Clone, Copy)]
pub struct SemanticContext<'a> {
    pub lexicon: &'a Lexicon,

    /// Corpus-derived information-content model, required by res/lin/jcn.
    pub ic: Option<&'a IcModel>,

    /// How phrases are mapped to synsets.
    ///
    /// `true` resolves only the head word of the phrase (the WordNet
    /// standard treatment); `false` resolves every token and pools all of
    /// their synsets (the distributional-semantics treatment).
    pub use_heads: bool,
}

impl<'a> SemanticContext<'a> {
    /// A context resolving phrases through their head words, without an
    /// information-content model.
    pub fn new(lexicon: &'a Lexicon) -> Self {
        SemanticContext {
            lexicon,
            ic: None,
            use_heads: true,
        }
    }
}

/// Condensed semantic distances over all label pairs.
///
/// Computes the full pairwise similarity matrix, finds its global maximum M,
/// and converts every similarity s to `(M - s) / M`, so the most similar
/// pair lands at distance 0. A batch where every similarity is 0 (for
/// example, fully out-of-vocabulary input) has no defined conversion and is
/// reported as [`DistanceError::DegenerateBatch`].
pub(crate) fn distance_matrix(
    labels: &[String],
    measure: SemanticMeasure,
    context: &SemanticContext<'_>,
) -> Result<CondensedMatrix, DistanceError> {
    let similarities =
        CondensedMatrix::try_from_fn(labels.len(), |i, j| {
            phrase_similarity(&labels[i], &labels[j], measure, context)
        })?;

    let maximum = similarities.values().iter().copied().fold(0.0, f64::max);
    if !similarities.is_empty() && maximum == 0.0 {
        return Err(DistanceError::DegenerateBatch);
    }

    let items = similarities.items();
    let distances = similarities
        .into_values()
        .into_iter()
        .map(|s| (maximum - s) / maximum)
        .collect();
    Ok(CondensedMatrix::new(items, distances))
}

/// Similarity between two words or phrases.
///
/// Builds the pool of same-part-of-speech synset pairs for the two phrases
/// and returns the maximum pairwise similarity over the pool: a phrase may
/// be lexically ambiguous, and the maximum picks the most favorable sense
/// alignment. Returns exactly 0 when either phrase resolves to no synsets,
/// when no pair shares a part of speech, or when every pair in the pool is
/// incomparable under the chosen measure. Out-of-vocabulary input never
/// aborts a batch.
pub fn phrase_similarity(
    first: &str,
    second: &str,
    measure: SemanticMeasure,
    context: &SemanticContext<'_>,
) -> Result<f64, DistanceError> {
    if measure.requires_ic() && context.ic.is_none() {
        return Err(DistanceError::MissingIcModel {
            measure: Measure::Semantic(measure),
        });
    }

    let synsets_first = resolve_synsets(first, context);
    let synsets_second = resolve_synsets(second, context);
    if synsets_first.is_empty() || synsets_second.is_empty() {
        return Ok(0.0);
    }

    let mut best: Option<f64> = None;
    for &a in &synsets_first {
        for &b in &synsets_second {
            if a.pos != b.pos {
                continue;
            }
            // Incomparable pairs are dropped, not fatal.
            if let Some(value) = context.lexicon.similarity(a, b, measure, context.ic) {
                best = Some(best.map_or(value, |current| current.max(value)));
            }
        }
    }

    Ok(best.unwrap_or(0.0))
}

fn resolve_synsets(phrase: &str, context: &SemanticContext<'_>) -> Vec<SynsetId> {
    if context.use_heads {
        match tokenize::head(phrase) {
            Some(head) => context.lexicon.synsets(&head),
            None => Vec::new(),
        }
    } else {
        let mut synsets = Vec::new();
        for token in tokenize::tokenize(phrase) {
            for id in context.lexicon.synsets(&token) {
                if !synsets.contains(&id) {
                    synsets.push(id);
                }
            }
        }
        synsets
    }
}
