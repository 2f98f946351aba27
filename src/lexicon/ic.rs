//! Corpus-derived information-content model.

use super::{PartOfSpeech, SynsetId};
use crate::error::LexiconError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Synset frequency counts from a tagged corpus.
///
/// Loaded once from the standard `wnver::`-headed count format (one
/// `<offset><pos> <count> [ROOT]` record per line) and queried read-only by
/// the information-content based similarity measures.
#[derive(Debug)]
pub struct IcModel {
    counts: HashMap<(PartOfSpeech, u32), f64>,
    totals: HashMap<PartOfSpeech, f64>,
}

impl IcModel {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    fn from_reader(reader: impl BufRead, path: &Path) -> Result<Self, LexiconError> {
        let mut model = IcModel {
            counts: HashMap::new(),
            totals: HashMap::new(),
        };

        for (number, line) in reader.lines().enumerate() {
            let number = number + 1;
            let line = line.map_err(|source| LexiconError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with("wnver") {
                continue;
            }

            let mut fields = line.split_whitespace();
            let key = fields.next().unwrap_or_default();
            let value = fields.next().ok_or_else(|| parse_error(path, number, "missing count"))?;
            let is_root = fields.next() == Some("ROOT");

            let (offset, tag) = key.split_at(key.len().saturating_sub(1));
            let pos = tag
                .chars()
                .next()
                .and_then(PartOfSpeech::from_tag)
                .ok_or_else(|| parse_error(path, number, format!("bad record key `{key}`")))?;
            let offset: u32 = offset
                .parse()
                .map_err(|_| parse_error(path, number, format!("bad synset offset in `{key}`")))?;
            let count: f64 = value
                .parse()
                .map_err(|_| parse_error(path, number, format!("bad count `{value}`")))?;

            model.counts.insert((pos, offset), count);
            if is_root {
                *model.totals.entry(pos).or_insert(0.0) += count;
            }
        }

        Ok(model)
    }

    /// IC(s) = -ln(freq(s) / N) for the synset's part of speech.
    ///
    /// `None` when the model has no entries for that part of speech (the
    /// usual corpora only cover nouns and verbs); infinite for a synset the
    /// corpus never observed.
    pub(crate) fn information_content(&self, id: SynsetId) -> Option<f64> {
        let pos = match id.pos {
            PartOfSpeech::AdjectiveSatellite => PartOfSpeech::Adjective,
            other => other,
        };
        let total = self.totals.get(&pos).copied()?;
        if total <= 0.0 {
            return None;
        }
        let frequency = self.counts.get(&(pos, id.offset)).copied().unwrap_or(0.0);
        if frequency == 0.0 {
            Some(f64::INFINITY)
        } else {
            Some(-(frequency / total).ln())
        }
    }

    #[cfg(test)]
    pub(crate) fn from_str_for_test(content: &str) -> Self {
        use std::io::Cursor;
        Self::from_reader(Cursor::new(content), Path::new("fixture-ic")).unwrap()
    }
}

fn parse_error(path: &Path, line: usize, reason: impl Into<String>) -> LexiconError {
    LexiconError::Parse {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_counts_and_root_totals() {
        let model = IcModel::from_str_for_test(
            "wnver::fixture\n1740n 5000.0 ROOT\n2137n 2500.0\n1740v 100.0 ROOT\n",
        );
        let noun = |offset| SynsetId {
            pos: PartOfSpeech::Noun,
            offset,
        };
        // Half the corpus mass: IC = ln 2.
        let ic = model.information_content(noun(2137)).unwrap();
        assert!((ic - 2.0f64.ln()).abs() < 1e-12);
        // The root itself carries no information.
        assert_eq!(model.information_content(noun(1740)), Some(0.0));
    }

    #[test]
    fn unseen_synsets_are_infinitely_informative() {
        let model = IcModel::from_str_for_test("1740n 5000.0 ROOT\n");
        let unseen = SynsetId {
            pos: PartOfSpeech::Noun,
            offset: 999,
        };
        assert_eq!(model.information_content(unseen), Some(f64::INFINITY));
    }

    #[test]
    fn uncovered_pos_is_not_comparable() {
        let model = IcModel::from_str_for_test("1740n 5000.0 ROOT\n");
        let adverb = SynsetId {
            pos: PartOfSpeech::Adverb,
            offset: 1,
        };
        assert_eq!(model.information_content(adverb), None);
    }

    #[test]
    fn malformed_count_is_reported() {
        use std::io::Cursor;
        let err =
            IcModel::from_reader(Cursor::new("1740n five ROOT\n"), Path::new("bad-ic")).unwrap_err();
        assert!(matches!(err, LexiconError::Parse { line: 1, .. }));
    }
}
