use crate::measure::Measure;
use std::path::PathBuf;
use thiserror::Error;

/// Error types surfaced by the distance engine.
#[derive(Debug, Error)]
pub enum DistanceError {
    #[error("unknown distance measure `{0}`")]
    UnknownMeasure(String),

    #[error("measure `{measure}` requires vectors, but the input table has none")]
    MissingVectors { measure: Measure },

    #[error("vector length mismatch: item {index} has {actual} entries, expected {expected}")]
    DimensionMismatch {
        /// Positional index of the offending item.
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("measure `{measure}` requires a loaded lexicon")]
    MissingLexicon { measure: Measure },

    #[error("measure `{measure}` requires an information-content model")]
    MissingIcModel { measure: Measure },

    #[error("degenerate batch: every pairwise similarity is 0, distances are undefined")]
    DegenerateBatch,
}

/// Errors raised while loading the lexical resource or the
/// information-content model.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line {line} in `{path}`: {reason}")]
    Parse {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        reason: String,
    },
}

/// Errors raised while reading the input table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid vector entry `{value}`")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        value: String,
    },
}

/// Errors raised by the clustering driver.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error(transparent)]
    Distance(#[from] DistanceError),

    #[error("unknown linkage method `{0}`")]
    UnknownLinkage(String),

    #[error("clustering needs at least two items, got {0}")]
    NotEnoughItems(usize),

    #[error("cannot split {items} items into {requested} clusters")]
    BadClusterCount { items: usize, requested: usize },

    #[error("failed to write clustering output: {0}")]
    Output(#[from] std::io::Error),
}
