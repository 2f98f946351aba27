//! The clustering input: one labeled, optionally vector-valued item per line.

use crate::error::TableError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// An ordered list of items to cluster.
///
/// Each item is a word or phrase plus an optional numeric feature vector,
/// read from a tab-separated line: `word \t number \t number ...`
/// Item identity is the positional index; duplicate labels are legal and
/// stay distinct.
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    labels: Vec<String>,
    vectors: Vec<Vec<f64>>,
}

impl ItemTable {
    /// Reads a table from a file, one item per line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    fn from_reader(reader: impl BufRead, path: &Path) -> Result<Self, TableError> {
        let mut table = ItemTable::default();
        for (line_index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| TableError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            table.push_line(line, line_index + 1)?;
        }
        Ok(table)
    }

    fn push_line(&mut self, line: &str, line_number: usize) -> Result<(), TableError> {
        let mut fields = line.split('\t');
        // The first field is always the label; the rest are vector entries.
        let label = fields.next().unwrap_or_default().to_string();
        let mut vector = Vec::new();
        for field in fields {
            let value = field
                .trim()
                .parse::<f64>()
                .map_err(|_| TableError::InvalidNumber {
                    line: line_number,
                    value: field.to_string(),
                })?;
            vector.push(value);
        }
        self.labels.push(label);
        self.vectors.push(vector);
        Ok(())
    }

    /// Builds a table of bare labels, without feature vectors.
    pub fn from_labels(labels: Vec<String>) -> Self {
        let vectors = vec![Vec::new(); labels.len()];
        ItemTable { labels, vectors }
    }

    /// Builds a table from (label, vector) rows.
    pub fn from_rows(rows: Vec<(String, Vec<f64>)>) -> Self {
        let (labels, vectors) = rows.into_iter().unzip();
        ItemTable { labels, vectors }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }
}
