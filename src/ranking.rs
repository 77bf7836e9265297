//! Nearest-neighbour ranking of candidates around a reference row

use crate::catalog::EncodedTable;
use crate::scoring::{cosine_distance, standardize};
use crate::types::Neighbor;
use tracing::debug;

/// Similarity features, used when present in the encoded table
pub const FEATURE_COLUMNS: [&str; 3] = ["rating", "cost", "delivery_time"];

/// Position of the similarity anchor within the candidate set
pub const REFERENCE_POSITION: usize = 0;

/// Standardized feature vectors for the candidate rows.
///
/// Absent feature columns are dropped; missing or non-finite cells read as 0.
pub fn feature_matrix(features: &EncodedTable) -> Vec<Vec<f64>> {
    let columns: Vec<usize> = FEATURE_COLUMNS
        .iter()
        .filter_map(|name| features.column(name))
        .collect();

    let mut rows: Vec<Vec<f64>> = (0..features.len())
        .map(|row| {
            columns
                .iter()
                .map(|&col| {
                    features
                        .value(row, col)
                        .filter(|v| v.is_finite())
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    standardize(&mut rows);
    rows
}

/// Up to `top_n` nearest neighbours of the reference row, closest first.
///
/// `min(top_n + 1, len)` neighbours are taken with the reference in the first
/// slot, then the reference is dropped, so at most `min(top_n, len - 1)` come
/// back. Equal distances keep candidate order.
pub fn rank_neighbors(features: &EncodedTable, top_n: usize) -> Vec<Neighbor> {
    let matrix = feature_matrix(features);
    let Some(reference) = matrix.get(REFERENCE_POSITION) else {
        return Vec::new();
    };

    let requested = (top_n + 1).min(matrix.len());

    let mut neighbors: Vec<Neighbor> = matrix
        .iter()
        .enumerate()
        .filter(|(pos, _)| *pos != REFERENCE_POSITION)
        .map(|(position, row)| Neighbor {
            position,
            distance: cosine_distance(reference, row),
        })
        .collect();

    neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    neighbors.truncate(requested.saturating_sub(1));

    debug!(
        "Ranked {} candidates, kept {} neighbours (requested {})",
        matrix.len(),
        neighbors.len(),
        requested
    );

    neighbors
}
