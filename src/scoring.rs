//! Feature scaling and distance functions for candidate ranking

/// Below this a column is treated as having no spread
const MIN_STD: f64 = 1e-12;

/// Standardize each column in place: z = (x - mean) / std.
///
/// Mean and std are population statistics over the given rows. A column with
/// no spread is only centered, which leaves it all zeros.
pub fn standardize(rows: &mut [Vec<f64>]) {
    let n_rows = rows.len();
    if n_rows == 0 {
        return;
    }
    let n_cols = rows[0].len();

    for col in 0..n_cols {
        let mean = rows.iter().map(|r| r[col]).sum::<f64>() / n_rows as f64;
        let variance = rows.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n_rows as f64;
        let std = variance.sqrt();
        let scale = if std > MIN_STD { std } else { 1.0 };

        for row in rows.iter_mut() {
            row[col] = (row[col] - mean) / scale;
        }
    }
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity; zero-length vectors are orthogonal to everything
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (na, nb) = (norm(a), norm(b));
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (na * nb)
}

/// 1 - cosine similarity, in [0, 2]
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    (1.0 - cosine_similarity(a, b)).clamp(0.0, 2.0)
}
