//! Vector similarity primitives used by the recommenders.
//!
//! Every function here is total: degenerate inputs (zero vectors, constant
//! series, NaN components) produce `0.0` instead of NaN.

/// Dot product over the common prefix of two vectors
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm
pub fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Replaces NaN and infinite components with zero
pub fn fill_non_finite(v: &mut [f64]) {
    for x in v.iter_mut() {
        if !x.is_finite() {
            *x = 0.0;
        }
    }
}

/// Cosine similarity `dot(u, v) / (|u| * |v|)`, zero when either norm is zero
pub fn cosine_similarity(u: &[f64], v: &[f64]) -> f64 {
    let denominator = norm(u) * norm(v);
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    dot(u, v) / denominator
}

/// Pearson correlation of paired samples
///
/// Means are taken over the pairs themselves. Returns zero for fewer than
/// `min_support` pairs or when either series has no variance.
pub fn pearson_correlation(pairs: &[(f64, f64)], min_support: usize) -> f64 {
    if pairs.is_empty() || pairs.len() < min_support {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut covariance, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    covariance / denominator
}
