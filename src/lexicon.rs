//! The lexical resource: a WordNet-compatible sense inventory.
//!
//! The database is loaded once from the standard WNdb files and queried
//! read-only afterwards. Pairwise synset similarity lives here; choosing
//! which synsets to compare is the measure layer's job.

mod ic;
mod morphy;
mod wndb;

pub use ic::IcModel;

use crate::error::LexiconError;
use crate::measure::SemanticMeasure;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;

/// Part-of-speech tag of a synset.
///
/// Satellite adjectives keep their own tag: the sense inventory
/// distinguishes them from head adjectives, and so does the same-POS pair
/// filter built on top of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

impl PartOfSpeech {
    /// The four parts of speech the database files are split by.
    pub(crate) const FILE_POSES: [(PartOfSpeech, &'static str); 4] = [
        (PartOfSpeech::Noun, "noun"),
        (PartOfSpeech::Verb, "verb"),
        (PartOfSpeech::Adjective, "adj"),
        (PartOfSpeech::Adverb, "adv"),
    ];

    pub(crate) fn from_tag(tag: char) -> Option<PartOfSpeech> {
        match tag {
            'n' => Some(PartOfSpeech::Noun),
            'v' => Some(PartOfSpeech::Verb),
            'a' => Some(PartOfSpeech::Adjective),
            's' => Some(PartOfSpeech::AdjectiveSatellite),
            'r' => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::AdjectiveSatellite => 's',
            PartOfSpeech::Adverb => 'r',
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::AdjectiveSatellite => "adjective satellite",
            PartOfSpeech::Adverb => "adverb",
        };
        f.write_str(name)
    }
}

/// Identifier of a synset: its part of speech plus its database offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SynsetId {
    pub pos: PartOfSpeech,
    pub offset: u32,
}

/// One sense grouping of synonymous word meanings.
#[derive(Debug, Clone)]
pub struct Synset {
    id: SynsetId,
    lemmas: Vec<String>,
    hypernyms: Vec<SynsetId>,
    gloss: String,
}

impl Synset {
    pub(crate) fn new(
        id: SynsetId,
        lemmas: Vec<String>,
        hypernyms: Vec<SynsetId>,
        gloss: String,
    ) -> Self {
        Synset {
            id,
            lemmas,
            hypernyms,
            gloss,
        }
    }

    pub fn id(&self) -> SynsetId {
        self.id
    }

    pub fn lemmas(&self) -> &[String] {
        &self.lemmas
    }

    pub fn gloss(&self) -> &str {
        &self.gloss
    }
}

/// The loaded sense inventory.
///
/// Immutable after loading; similarity queries never mutate it, so it can be
/// shared freely by reference.
pub struct Lexicon {
    synsets: HashMap<SynsetId, Synset>,
    index: HashMap<(PartOfSpeech, String), Vec<SynsetId>>,
    exceptions: HashMap<(PartOfSpeech, String), Vec<String>>,
    max_depth: HashMap<PartOfSpeech, u32>,
}

impl Lexicon {
    /// Loads the database files (`data.*`, `index.*`, `*.exc`) from a
    /// directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LexiconError> {
        wndb::load_dir(dir.as_ref())
    }

    pub(crate) fn empty() -> Self {
        Lexicon {
            synsets: HashMap::new(),
            index: HashMap::new(),
            exceptions: HashMap::new(),
            max_depth: HashMap::new(),
        }
    }

    pub(crate) fn insert_synset(&mut self, synset: Synset) {
        self.synsets.insert(synset.id, synset);
    }

    pub(crate) fn insert_index_entry(&mut self, pos: PartOfSpeech, lemma: String, ids: Vec<SynsetId>) {
        self.index.insert((pos, lemma), ids);
    }

    pub(crate) fn insert_exception(&mut self, pos: PartOfSpeech, form: String, bases: Vec<String>) {
        self.exceptions.insert((pos, form), bases);
    }

    pub(crate) fn contains_id(&self, id: SynsetId) -> bool {
        self.synsets.contains_key(&id)
    }

    pub(crate) fn has_lemma(&self, pos: PartOfSpeech, form: &str) -> bool {
        self.index.contains_key(&(pos, form.to_string()))
    }

    pub(crate) fn exception_bases(&self, pos: PartOfSpeech, form: &str) -> Option<&[String]> {
        self.exceptions
            .get(&(pos, form.to_string()))
            .map(Vec::as_slice)
    }

    pub fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(&id)
    }

    /// All synsets of a word, across every part of speech.
    ///
    /// The lookup lowercases the word and applies morphological
    /// normalization, so inflected forms resolve to their base senses.
    /// An empty result means the word is not in the lexicon.
    pub fn synsets(&self, word: &str) -> Vec<SynsetId> {
        let normalized = word.to_lowercase().replace(' ', "_");
        let mut found = Vec::new();
        for (pos, _) in PartOfSpeech::FILE_POSES {
            for form in morphy::base_forms(self, pos, &normalized) {
                if let Some(ids) = self.index.get(&(pos, form)) {
                    for &id in ids {
                        if !found.contains(&id) {
                            found.push(id);
                        }
                    }
                }
            }
        }
        found
    }

    /// Pairwise synset similarity under the given measure.
    ///
    /// `None` means the pair is not comparable: no connecting taxonomy path,
    /// or the information-content model has no entries for the pair's part
    /// of speech. Callers drop such pairs.
    pub fn similarity(
        &self,
        a: SynsetId,
        b: SynsetId,
        measure: SemanticMeasure,
        ic: Option<&IcModel>,
    ) -> Option<f64> {
        match measure {
            SemanticMeasure::Path => self.path_similarity(a, b),
            SemanticMeasure::Wup => self.wup_similarity(a, b),
            SemanticMeasure::Lch => self.lch_similarity(a, b),
            SemanticMeasure::Res => self.resnik_similarity(a, b, ic?),
            SemanticMeasure::Lin => self.lin_similarity(a, b, ic?),
            SemanticMeasure::Jcn => self.jcn_similarity(a, b, ic?),
        }
    }

    /// 1 / (1 + d) over the shortest hypernym path between the synsets.
    fn path_similarity(&self, a: SynsetId, b: SynsetId) -> Option<f64> {
        let distance = self.shortest_path_distance(a, b)?;
        Some(1.0 / (distance as f64 + 1.0))
    }

    /// Wu-Palmer: 2 * depth(lcs) / (len_a + len_b + 2 * depth(lcs)), where the
    /// least common subsumer is the deepest shared ancestor and depth counts
    /// the root as 1.
    fn wup_similarity(&self, a: SynsetId, b: SynsetId) -> Option<f64> {
        let from_a = self.hypernym_distances(a);
        let from_b = self.hypernym_distances(b);

        let mut subsumer: Option<(SynsetId, u32)> = None;
        for id in from_a.keys() {
            if from_b.contains_key(id) {
                let depth = self.min_depth(*id);
                if subsumer.map_or(true, |(_, best)| depth > best) {
                    subsumer = Some((*id, depth));
                }
            }
        }

        let (depth, len_a, len_b) = match subsumer {
            Some((id, min_depth)) => (min_depth + 1, from_a[&id], from_b[&id]),
            // Verbs have no shared root; simulate one above the deepest
            // ancestor of each synset.
            None if needs_root(a.pos) => (
                1,
                from_a.values().max().copied().unwrap_or(0) + 1,
                from_b.values().max().copied().unwrap_or(0) + 1,
            ),
            None => return None,
        };

        let depth = f64::from(depth);
        Some(2.0 * depth / (f64::from(len_a) + f64::from(len_b) + 2.0 * depth))
    }

    /// Leacock-Chodorow: -ln((d + 1) / (2 * D)) with D the taxonomy depth for
    /// the part of speech.
    fn lch_similarity(&self, a: SynsetId, b: SynsetId) -> Option<f64> {
        let taxonomy_depth = *self.max_depth.get(&a.pos)?;
        if taxonomy_depth == 0 {
            return None;
        }
        let distance = self.shortest_path_distance(a, b)?;
        Some(-(f64::from(distance + 1) / (2.0 * f64::from(taxonomy_depth))).ln())
    }

    /// Resnik: information content of the most informative common subsumer.
    fn resnik_similarity(&self, a: SynsetId, b: SynsetId, ic: &IcModel) -> Option<f64> {
        self.most_informative_subsumer(a, b, ic)
    }

    /// Lin: 2 * IC(lcs) / (IC(a) + IC(b)).
    fn lin_similarity(&self, a: SynsetId, b: SynsetId, ic: &IcModel) -> Option<f64> {
        let subsumer = self.most_informative_subsumer(a, b, ic)?;
        let ic_a = ic.information_content(a)?;
        let ic_b = ic.information_content(b)?;
        let denominator = ic_a + ic_b;
        if denominator == 0.0 {
            return None;
        }
        Some(2.0 * subsumer / denominator)
    }

    /// Jiang-Conrath: 1 / (IC(a) + IC(b) - 2 * IC(lcs)); infinite when the
    /// information-content difference vanishes.
    fn jcn_similarity(&self, a: SynsetId, b: SynsetId, ic: &IcModel) -> Option<f64> {
        let subsumer = self.most_informative_subsumer(a, b, ic)?;
        let ic_a = ic.information_content(a)?;
        let ic_b = ic.information_content(b)?;
        let difference = ic_a + ic_b - 2.0 * subsumer;
        if difference == 0.0 {
            return Some(f64::INFINITY);
        }
        Some(1.0 / difference)
    }

    fn most_informative_subsumer(&self, a: SynsetId, b: SynsetId, ic: &IcModel) -> Option<f64> {
        let from_a = self.hypernym_distances(a);
        let from_b = self.hypernym_distances(b);
        let mut best: Option<f64> = None;
        for id in from_a.keys() {
            if from_b.contains_key(id) {
                if let Some(value) = ic.information_content(*id) {
                    best = Some(best.map_or(value, |current| current.max(value)));
                }
            }
        }
        best
    }

    /// Length of the shortest path between two synsets through the hypernym
    /// taxonomy, simulating a shared root where the part of speech needs one.
    fn shortest_path_distance(&self, a: SynsetId, b: SynsetId) -> Option<u32> {
        if a == b {
            return Some(0);
        }
        let from_a = self.hypernym_distances(a);
        let from_b = self.hypernym_distances(b);

        let mut best: Option<u32> = None;
        for (id, dist_a) in &from_a {
            if let Some(dist_b) = from_b.get(id) {
                let candidate = dist_a + dist_b;
                if best.map_or(true, |current| candidate < current) {
                    best = Some(candidate);
                }
            }
        }

        if needs_root(a.pos) {
            let through_root = from_a.values().max().copied().unwrap_or(0)
                + from_b.values().max().copied().unwrap_or(0)
                + 2;
            if best.map_or(true, |current| through_root < current) {
                best = Some(through_root);
            }
        }

        best
    }

    /// Every hypernym ancestor of a synset (itself included) with its
    /// distance in edges.
    fn hypernym_distances(&self, id: SynsetId) -> HashMap<SynsetId, u32> {
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back((id, 0u32));
        while let Some((current, distance)) = queue.pop_front() {
            if distances.contains_key(&current) {
                continue;
            }
            distances.insert(current, distance);
            if let Some(synset) = self.synsets.get(&current) {
                for &hypernym in &synset.hypernyms {
                    queue.push_back((hypernym, distance + 1));
                }
            }
        }
        distances
    }

    /// Shortest distance from a synset up to a taxonomy root.
    fn min_depth(&self, id: SynsetId) -> u32 {
        self.hypernym_distances(id)
            .into_iter()
            .filter(|(ancestor, _)| {
                self.synsets
                    .get(ancestor)
                    .map_or(true, |s| s.hypernyms.is_empty())
            })
            .map(|(_, distance)| distance)
            .min()
            .unwrap_or(0)
    }

    /// Computes the per-POS taxonomy depth; called once after loading.
    pub(crate) fn compute_max_depths(&mut self) {
        let ids: Vec<SynsetId> = self.synsets.keys().copied().collect();
        let mut memo = HashMap::new();
        let mut per_pos: HashMap<PartOfSpeech, u32> = HashMap::new();
        for id in ids {
            let depth = self.longest_hypernym_path(id, &mut memo);
            let entry = per_pos.entry(id.pos).or_insert(0);
            if depth > *entry {
                *entry = depth;
            }
        }
        self.max_depth = per_pos;
    }

    fn longest_hypernym_path(&self, id: SynsetId, memo: &mut HashMap<SynsetId, u32>) -> u32 {
        if let Some(&depth) = memo.get(&id) {
            return depth;
        }
        let depth = match self.synsets.get(&id) {
            Some(synset) if !synset.hypernyms.is_empty() => {
                1 + synset
                    .hypernyms
                    .iter()
                    .map(|&h| self.longest_hypernym_path(h, memo))
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        };
        memo.insert(id, depth);
        depth
    }
}

/// Whether the taxonomy for a part of speech needs a simulated shared root.
///
/// The noun taxonomy is single-rooted; verbs form disconnected trees.
fn needs_root(pos: PartOfSpeech) -> bool {
    matches!(pos, PartOfSpeech::Verb)
}


#[cfg(test)]
mod test {
    use super::test_support::{cat, dog, fixture_lexicon, vehicle, FIXTURE_IC};
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn fixture_ic() -> IcModel {
        IcModel::from_str_for_test(FIXTURE_IC)
    }

    #[test]
    fn lookup_resolves_inflected_forms() {
        let lexicon = fixture_lexicon();
        assert_eq!(lexicon.synsets("cat"), lexicon.synsets("cats"));
        assert_eq!(lexicon.synsets("Cat"), lexicon.synsets("cat"));
        assert!(lexicon.synsets("zzqqxx").is_empty());
    }

    #[test]
    fn path_similarity_counts_taxonomy_edges() {
        let lexicon = fixture_lexicon();
        let same = lexicon.path_similarity(cat(), cat()).unwrap();
        assert!((same - 1.0).abs() < EPSILON);
        // cat and dog are two edges apart through carnivore.
        let siblings = lexicon.path_similarity(cat(), dog()).unwrap();
        assert!((siblings - 1.0 / 3.0).abs() < EPSILON);
        // cat to vehicle crosses the whole tree: six edges.
        let distant = lexicon.path_similarity(cat(), vehicle()).unwrap();
        assert!((distant - 1.0 / 7.0).abs() < EPSILON);
    }

    #[test]
    fn wup_rewards_deep_subsumers() {
        let lexicon = fixture_lexicon();
        // lcs(cat, dog) = carnivore at depth 4; both one edge away.
        let siblings = lexicon.wup_similarity(cat(), dog()).unwrap();
        assert!((siblings - 0.8).abs() < EPSILON, "got {siblings}");
        let distant = lexicon.wup_similarity(cat(), vehicle()).unwrap();
        assert!(siblings > distant);
    }

    #[test]
    fn lch_uses_the_taxonomy_depth() {
        let lexicon = fixture_lexicon();
        // d = 2, taxonomy depth D = 4: -ln(3 / 8)
        let siblings = lexicon.lch_similarity(cat(), dog()).unwrap();
        assert!((siblings - (8.0f64 / 3.0).ln()).abs() < EPSILON, "got {siblings}");
    }

    #[test]
    fn resnik_picks_the_most_informative_subsumer() {
        let lexicon = fixture_lexicon();
        let ic = fixture_ic();
        let value = lexicon.resnik_similarity(cat(), dog(), &ic).unwrap();
        assert!((value - (1000.0f64 / 300.0).ln()).abs() < EPSILON, "got {value}");
    }

    #[test]
    fn lin_normalizes_by_the_synset_content() {
        let lexicon = fixture_lexicon();
        let ic = fixture_ic();
        let lcs = (1000.0f64 / 300.0).ln();
        let ic_cat = (1000.0f64 / 100.0).ln();
        let expected = 2.0 * lcs / (2.0 * ic_cat);
        let value = lexicon.lin_similarity(cat(), dog(), &ic).unwrap();
        assert!((value - expected).abs() < EPSILON, "got {value}");
    }

    #[test]
    fn jcn_is_infinite_for_identical_content() {
        let lexicon = fixture_lexicon();
        let ic = fixture_ic();
        let value = lexicon.jcn_similarity(cat(), cat(), &ic).unwrap();
        assert!(value.is_infinite());
        let siblings = lexicon.jcn_similarity(cat(), dog(), &ic).unwrap();
        let expected = 1.0 / (2.0 * (1000.0f64 / 100.0).ln() - 2.0 * (1000.0f64 / 300.0).ln());
        assert!((siblings - expected).abs() < EPSILON, "got {siblings}");
    }

    #[test]
    fn ic_measures_drop_unsupported_pos() {
        let lexicon = fixture_lexicon();
        let ic = fixture_ic();
        let sprint = lexicon.synsets("sprint")[0];
        // The fixture model has noun counts only.
        assert!(lexicon.resnik_similarity(sprint, sprint, &ic).is_none());
    }

    #[test]
    fn disconnected_verbs_still_have_a_path() {
        let mut lexicon = fixture_lexicon();
        let other = SynsetId {
            pos: PartOfSpeech::Verb,
            offset: 21,
        };
        lexicon.insert_synset(Synset::new(
            other,
            vec!["jog".to_string()],
            Vec::new(),
            String::new(),
        ));
        let sprint = SynsetId {
            pos: PartOfSpeech::Verb,
            offset: 20,
        };
        // Two rootless verbs connect only through the simulated root.
        assert_eq!(lexicon.shortest_path_distance(sprint, other), Some(2));
    }
}
