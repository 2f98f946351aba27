//! Morphological normalization: mapping inflected forms to base forms the
//! index knows, via exception lists and suffix-detachment rules.

use super::{Lexicon, PartOfSpeech};

const NOUN_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("er", ""),
    ("est", ""),
    ("er", "e"),
    ("est", "e"),
];

fn substitutions(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => NOUN_SUBSTITUTIONS,
        PartOfSpeech::Verb => VERB_SUBSTITUTIONS,
        PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => ADJECTIVE_SUBSTITUTIONS,
        PartOfSpeech::Adverb => &[],
    }
}

/// Base forms of `form` that the index actually contains for `pos`.
///
/// Exception lists win outright; otherwise detachment rules are applied
/// repeatedly until some candidate resolves. The original form itself counts
/// when the index already knows it.
pub(super) fn base_forms(lexicon: &Lexicon, pos: PartOfSpeech, form: &str) -> Vec<String> {
    if let Some(bases) = lexicon.exception_bases(pos, form) {
        let candidates: Vec<String> = std::iter::once(form.to_string())
            .chain(bases.iter().cloned())
            .collect();
        return filter_known(lexicon, pos, candidates);
    }

    let mut forms = apply_rules(pos, &[form.to_string()]);
    let mut candidates = vec![form.to_string()];
    candidates.extend(forms.iter().cloned());
    let results = filter_known(lexicon, pos, candidates);
    if !results.is_empty() {
        return results;
    }

    while !forms.is_empty() {
        forms = apply_rules(pos, &forms);
        let results = filter_known(lexicon, pos, forms.clone());
        if !results.is_empty() {
            return results;
        }
    }
    Vec::new()
}

fn apply_rules(pos: PartOfSpeech, forms: &[String]) -> Vec<String> {
    let mut derived = Vec::new();
    for form in forms {
        for (suffix, replacement) in substitutions(pos) {
            if let Some(stem) = form.strip_suffix(suffix) {
                derived.push(format!("{stem}{replacement}"));
            }
        }
    }
    derived
}

fn filter_known(lexicon: &Lexicon, pos: PartOfSpeech, forms: Vec<String>) -> Vec<String> {
    let mut known = Vec::new();
    for form in forms {
        if lexicon.has_lemma(pos, &form) && !known.contains(&form) {
            known.push(form);
        }
    }
    known
}
