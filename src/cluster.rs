//! The clustering driver: distances, linkage, flat cluster assignment.
//!
//! The hierarchical linkage computation itself is delegated to `kodama`;
//! this module feeds it a condensed distance matrix, flattens the resulting
//! dendrogram into a fixed number of clusters, and writes the membership
//! report.

mod flatten;

use crate::error::ClusterError;
use crate::measure::{self, Measure, SemanticContext};
use crate::table::ItemTable;
use crate::DistanceOutput;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::time::Instant;

/// Cluster-merge strategies of the linkage step.
///
/// Centroid, median and ward assume euclidean distances; they are only
/// meaningful together with the euclidean measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkageMethod {
    Single,
    Complete,
    Average,
    Weighted,
    Centroid,
    Median,
    Ward,
}

impl LinkageMethod {
    fn to_kodama(self) -> kodama::Method {
        match self {
            LinkageMethod::Single => kodama::Method::Single,
            LinkageMethod::Complete => kodama::Method::Complete,
            LinkageMethod::Average => kodama::Method::Average,
            LinkageMethod::Weighted => kodama::Method::Weighted,
            LinkageMethod::Centroid => kodama::Method::Centroid,
            LinkageMethod::Median => kodama::Method::Median,
            LinkageMethod::Ward => kodama::Method::Ward,
        }
    }
}

impl FromStr for LinkageMethod {
    type Err = ClusterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "single" => Ok(LinkageMethod::Single),
            "complete" => Ok(LinkageMethod::Complete),
            "average" => Ok(LinkageMethod::Average),
            "weighted" => Ok(LinkageMethod::Weighted),
            "centroid" => Ok(LinkageMethod::Centroid),
            "median" => Ok(LinkageMethod::Median),
            "ward" => Ok(LinkageMethod::Ward),
            _ => Err(ClusterError::UnknownLinkage(name.to_string())),
        }
    }
}

impl fmt::Display for LinkageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkageMethod::Single => "single",
            LinkageMethod::Complete => "complete",
            LinkageMethod::Average => "average",
            LinkageMethod::Weighted => "weighted",
            LinkageMethod::Centroid => "centroid",
            LinkageMethod::Median => "median",
            LinkageMethod::Ward => "ward",
        };
        f.write_str(name)
    }
}

/// A flat clustering of the input items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    /// Item indices grouped by cluster, each group ascending, groups ordered
    /// by their first member.
    clusters: Vec<Vec<usize>>,
}

impl Clustering {
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Runs the whole pipeline: distance matrix, linkage, flattening.
///
/// The euclidean measure defers its matrix, so it is computed here from the
/// raw vectors before the linkage step.
pub fn cluster(
    table: &ItemTable,
    measure: Measure,
    linkage: LinkageMethod,
    num_clusters: usize,
    semantics: Option<&SemanticContext<'_>>,
) -> Result<Clustering, ClusterError> {
    let items = table.len();
    if items < 2 {
        return Err(ClusterError::NotEnoughItems(items));
    }
    if num_clusters == 0 || num_clusters > items {
        return Err(ClusterError::BadClusterCount {
            items,
            requested: num_clusters,
        });
    }

    let start = Instant::now();
    let matrix = match measure::pairwise_distances(table, measure, semantics)? {
        DistanceOutput::Condensed(matrix) => matrix,
        DistanceOutput::Deferred => measure::euclidean_distances(table)?,
    };
    log::info!(
        "distance matrix ({measure}) over {items} items computed in {:?}",
        start.elapsed()
    );

    let start = Instant::now();
    let mut condensed = matrix.into_values();
    let dendrogram = kodama::linkage(&mut condensed, items, linkage.to_kodama());
    log::info!("{linkage} linkage computed in {:?}", start.elapsed());

    let clusters = flatten::flatten(&dendrogram, num_clusters);
    Ok(Clustering { clusters })
}

/// Writes the membership report: a header recording the parameters, then
/// one block per cluster listing its item labels.
pub fn write_assignment(
    mut out: impl Write,
    table: &ItemTable,
    measure: Measure,
    linkage: LinkageMethod,
    clustering: &Clustering,
) -> std::io::Result<()> {
    writeln!(
        out,
        "##Clustering result with distance measure={measure}, cluster linkage={linkage}, number of clusters={}",
        clustering.len()
    )?;
    for (number, members) in clustering.clusters().iter().enumerate() {
        writeln!(out, "\n#--- cluster {} --", number + 1)?;
        for &item in members {
            writeln!(out, "{}", table.labels()[item])?;
        }
    }
    Ok(())
}
