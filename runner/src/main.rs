extern crate lexclust;

use lexclust::cluster::{self, LinkageMethod};
use lexclust::lexicon::{IcModel, Lexicon};
use lexclust::measure::{Measure, SemanticContext};
use lexclust::table::ItemTable;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::process;

fn usage(program: &str) -> ! {
    println!("Usage: {program} <input file> <distance measure> <cluster linkage> <number of clusters> [--full-phrase]");
    println!("Example: {program} vectorexample.txt euclidean single 5");
    println!();
    println!("   <input file> : file with one item per line, first entry is the word, tab-separated");
    println!("   <distance measure> : euclidean, cosine, levenshtein, levenshtein2,");
    println!("         WordNet_path, WordNet_wup, WordNet_lch, WordNet_res, WordNet_lin, WordNet_jcn");
    println!("   <cluster linkage> : single, complete, average, weighted, centroid*, median*, ward*");
    println!("         [methods with * can only be used with euclidean distance]");
    println!("   <number of clusters> : an integer");
    println!("   --full-phrase : resolve every token of a phrase instead of only its head word");
    println!();
    println!("WordNet measures read the database directory from WORDNET_DB and");
    println!("(for WordNet_res/lin/jcn) the information-content file from WORDNET_IC.");
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        usage(&args[0]);
    }
    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let input_path = &args[1];
    let measure: Measure = args[2].parse()?;
    let linkage: LinkageMethod = args[3].parse()?;
    let num_clusters: usize = args[4].parse()?;
    let use_heads = !args[5..].iter().any(|flag| flag == "--full-phrase");

    let output_path = format!("clustering_{measure}_{linkage}_{num_clusters}.txt");
    println!("Producing file: {output_path}");

    let table = ItemTable::from_path(input_path)?;

    // The lexicon and the information-content model are loaded once and
    // injected; non-WordNet measures skip the load entirely.
    let resources = match measure {
        Measure::Semantic(_) => {
            let dir = env::var("WORDNET_DB")
                .map_err(|_| "WordNet measures need WORDNET_DB set to the database directory")?;
            let lexicon = Lexicon::from_dir(dir)?;
            let ic = match env::var("WORDNET_IC") {
                Ok(path) => Some(IcModel::from_path(path)?),
                Err(_) => None,
            };
            Some((lexicon, ic))
        }
        _ => None,
    };
    let semantics = resources.as_ref().map(|(lexicon, ic)| SemanticContext {
        lexicon,
        ic: ic.as_ref(),
        use_heads,
    });

    let clustering = cluster::cluster(&table, measure, linkage, num_clusters, semantics.as_ref())?;

    for (number, members) in clustering.clusters().iter().enumerate() {
        println!("-- cluster {} --", number + 1);
        for &item in members {
            println!("{}", table.labels()[item]);
        }
    }

    let out_file = File::create(&output_path)?;
    cluster::write_assignment(BufWriter::new(out_file), &table, measure, linkage, &clustering)?;

    Ok(())
}
