//! Flattening a dendrogram into a fixed number of clusters.

use kodama::Dendrogram;

/// Applies the first `observations - num_clusters` merge steps and groups
/// the observations by the cluster they end up in.
///
/// Merged clusters are tracked with union-find: every step creates a new
/// cluster index and both merged clusters point at it, so an observation's
/// root is its flat cluster. Clusters come out ordered by their first
/// member, members ascending.
pub(crate) fn flatten(dendrogram: &Dendrogram<f64>, num_clusters: usize) -> Vec<Vec<usize>> {
    let observations = dendrogram.observations();
    let merges = observations.saturating_sub(num_clusters);

    let mut parent: Vec<usize> = (0..observations + merges).collect();
    for (index, step) in dendrogram.steps()[..merges].iter().enumerate() {
        let merged = observations + index;
        parent[step.cluster1] = merged;
        parent[step.cluster2] = merged;
    }

    let mut roots: Vec<usize> = Vec::new();
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for observation in 0..observations {
        let root = find_root(&mut parent, observation);
        match roots.iter().position(|&r| r == root) {
            Some(cluster) => clusters[cluster].push(observation),
            None => {
                roots.push(root);
                clusters.push(vec![observation]);
            }
        }
    }
    clusters
}

fn find_root(parent: &mut [usize], index: usize) -> usize {
    let up = parent[index];
    if up == index {
        return index;
    }
    let root = find_root(parent, up);
    parent[index] = root;
    root
}
