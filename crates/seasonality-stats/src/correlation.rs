//! Pearson correlation with pairwise-complete observations.
//!
//! Rows where either series is `NaN` are skipped pair by pair, so every
//! coefficient uses as many observations as the two series share.

use crate::error::StatsError;
use ndarray::{Array2, ArrayView1};

/// Pearson correlation of two equally long series, skipping `NaN` pairs.
///
/// Returns `NaN` when fewer than two complete pairs remain or either side
/// has zero variance.
///
/// # Errors
/// Fails when the series lengths differ.
pub fn pearson(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }

    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect();
    if pairs.len() < 2 {
        return Ok(f64::NAN);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return Ok(f64::NAN);
    }
    Ok((sxy / denom).clamp(-1.0, 1.0))
}

/// Correlation matrix of the columns of `data` (rows are observations).
///
/// The result is symmetric; missing values are handled pairwise.
pub fn correlation_matrix(data: &Array2<f64>) -> Result<Array2<f64>, StatsError> {
    let k = data.ncols();
    let mut corr = Array2::<f64>::from_elem((k, k), f64::NAN);

    for i in 0..k {
        for j in i..k {
            let value = pearson(data.column(i), data.column(j))?;
            corr[[i, j]] = value;
            corr[[j, i]] = value;
        }
    }

    Ok(corr)
}
