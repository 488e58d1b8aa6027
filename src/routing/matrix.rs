//! Pairwise distances.

use crate::spatial::{manhattan, Location};

/// N×N matrix of pairwise Manhattan distances among tour nodes.
///
/// Symmetric with a zero diagonal.
pub fn compute_distance_matrix(nodes: &[Location]) -> Vec<Vec<u32>> {
    nodes
        .iter()
        .map(|&a| nodes.iter().map(|&b| manhattan(a, b)).collect())
        .collect()
}

/// Total Manhattan length of a path, summed over consecutive pairs.
///
/// Independent of the solver; used to cross-check reported route
/// distances.
pub fn route_distance(path: &[Location]) -> u32 {
    path.windows(2).map(|pair| manhattan(pair[0], pair[1])).sum()
}
