extern crate lexclust;

use lexclust::cluster::{self, LinkageMethod};
use lexclust::lexicon::{IcModel, Lexicon};
use lexclust::measure::{pairwise_distances, phrase_similarity, SemanticContext};
use lexclust::table::ItemTable;
use lexclust::{DistanceOutput, Measure, SemanticMeasure};
use std::fs;
use std::path::PathBuf;

const DATA_NOUN: &str = "\
00000001 03 n 01 entity 0 000 | that which is perceived to exist
00000002 03 n 01 organism 0 001 @ 00000001 n 0000 | a living thing
00000003 03 n 01 animal 0 001 @ 00000002 n 0000 | a living organism
00000004 03 n 01 carnivore 0 001 @ 00000003 n 0000 | a flesh-eating mammal
00000005 03 n 01 cat 0 001 @ 00000004 n 0000 | feline mammal
00000006 03 n 01 dog 0 001 @ 00000004 n 0000 | canine mammal
00000007 03 n 01 artifact 0 001 @ 00000001 n 0000 | a man-made object
00000008 03 n 01 vehicle 0 001 @ 00000007 n 0000 | a conveyance
";

const INDEX_NOUN: &str = "\
animal n 1 0 1 0 00000003
artifact n 1 0 1 0 00000007
carnivore n 1 0 1 0 00000004
cat n 1 0 1 0 00000005
dog n 1 0 1 0 00000006
entity n 1 0 1 0 00000001
organism n 1 0 1 0 00000002
vehicle n 1 0 1 0 00000008
";

const DATA_VERB: &str = "\
00000020 29 v 01 run 0 000 | move fast on foot
00000021 29 v 01 jog 0 001 @ 00000020 v 0000 | run at a slow trot
";

const INDEX_VERB: &str = "\
jog v 1 0 1 0 00000021
run v 1 0 1 0 00000020
";

const VERB_EXC: &str = "\
ran run
running run
";

const IC_COUNTS: &str = "\
wnver::fixture
1n 1000.0 ROOT
2n 800.0
3n 600.0
4n 300.0
5n 100.0
6n 100.0
7n 200.0
8n 100.0
";

/// Writes a miniature WordNet database to a fresh temp directory.
fn write_fixture() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lexclust-fixture-{}", rand::random::<u64>()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("data.noun"), DATA_NOUN).unwrap();
    fs::write(dir.join("index.noun"), INDEX_NOUN).unwrap();
    fs::write(dir.join("data.verb"), DATA_VERB).unwrap();
    fs::write(dir.join("index.verb"), INDEX_VERB).unwrap();
    fs::write(dir.join("verb.exc"), VERB_EXC).unwrap();
    for name in ["data.adj", "index.adj", "data.adv", "index.adv"] {
        fs::write(dir.join(name), "").unwrap();
    }
    fs::write(dir.join("ic-fixture.dat"), IC_COUNTS).unwrap();
    dir
}

#[test]
fn taxonomy_clusters_cat_and_dog_before_vehicle() {
    let dir = write_fixture();
    let lexicon = Lexicon::from_dir(&dir).unwrap();
    let context = SemanticContext::new(&lexicon);

    let table = ItemTable::from_labels(vec!["cat".into(), "dog".into(), "vehicle".into()]);
    let measure = Measure::Semantic(SemanticMeasure::Path);

    let distances = pairwise_distances(&table, measure, Some(&context))
        .unwrap()
        .into_condensed()
        .unwrap();
    assert_eq!(distances.len(), 3);
    assert!(distances.values().iter().all(|&d| (0.0..=1.0).contains(&d)));
    // cat and dog are the most similar pair, so they sit at distance 0.
    assert_eq!(distances.get(0, 1), 0.0);
    assert!(distances.get(0, 2) > 0.0);

    let clustering = cluster::cluster(&table, measure, LinkageMethod::Single, 2, Some(&context))
        .unwrap();
    assert_eq!(clustering.clusters(), [vec![0, 1], vec![2]]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn inflected_forms_resolve_through_the_exception_list() {
    let dir = write_fixture();
    let lexicon = Lexicon::from_dir(&dir).unwrap();
    let context = SemanticContext::new(&lexicon);

    assert!(!lexicon.synsets("running").is_empty());
    assert_eq!(lexicon.synsets("running"), lexicon.synsets("run"));

    // jog is one taxonomy edge below run.
    let sim = phrase_similarity("running", "jog", SemanticMeasure::Path, &context).unwrap();
    assert!((sim - 0.5).abs() < 1e-12, "got {sim}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn resnik_uses_the_loaded_content_model() {
    let dir = write_fixture();
    let lexicon = Lexicon::from_dir(&dir).unwrap();
    let ic = IcModel::from_path(dir.join("ic-fixture.dat")).unwrap();
    let mut context = SemanticContext::new(&lexicon);
    context.ic = Some(&ic);

    let sim = phrase_similarity("cat", "dog", SemanticMeasure::Res, &context).unwrap();
    // Most informative common subsumer is carnivore: -ln(300 / 1000).
    assert!((sim - (1000.0f64 / 300.0).ln()).abs() < 1e-9, "got {sim}");

    // Verbs are not covered by the noun-only model and degrade to 0.
    let verbs = phrase_similarity("run", "jog", SemanticMeasure::Res, &context).unwrap();
    assert_eq!(verbs, 0.0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn containment_aware_edit_distance_end_to_end() {
    let table = ItemTable::from_labels(vec!["run".into(), "running".into(), "jog".into()]);
    let distances = pairwise_distances(&table, Measure::LevenshteinContainment, None)
        .unwrap()
        .into_condensed()
        .unwrap();
    assert_eq!(distances.get(0, 1), 0.0);
    assert_eq!(distances.get(0, 2), 3.0);
    assert_eq!(distances.get(1, 2), 7.0);

    let clustering = cluster::cluster(
        &table,
        Measure::LevenshteinContainment,
        LinkageMethod::Complete,
        2,
        None,
    )
    .unwrap();
    assert_eq!(clustering.clusters(), [vec![0, 1], vec![2]]);
}

#[test]
fn cosine_distances_stay_in_the_clamping_band() {
    let items = 40;
    let rows: Vec<(String, Vec<f64>)> = (0..items)
        .map(|i| {
            let vector = (0..8).map(|_| rand::random::<f64>() * 2.0 - 1.0).collect();
            (format!("item{i}"), vector)
        })
        .collect();
    let table = ItemTable::from_rows(rows);

    let distances = pairwise_distances(&table, Measure::Cosine, None)
        .unwrap()
        .into_condensed()
        .unwrap();
    assert_eq!(distances.len(), items * (items - 1) / 2);
    assert!(distances
        .values()
        .iter()
        .all(|&d| (0.0..=1000.0).contains(&d)));
}

#[test]
fn euclidean_is_deferred_to_the_clustering_step() {
    let table = ItemTable::from_rows(vec![
        ("a".into(), vec![0.0]),
        ("b".into(), vec![1.0]),
    ]);
    let output = pairwise_distances(&table, Measure::Euclidean, None).unwrap();
    assert_eq!(output, DistanceOutput::Deferred);

    // The driver computes the euclidean matrix itself.
    let clustering =
        cluster::cluster(&table, Measure::Euclidean, LinkageMethod::Ward, 2, None).unwrap();
    assert_eq!(clustering.len(), 2);
}
