//! Histogram binning and Gaussian kernel density estimation.

use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Equal-width histogram over the data range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` of them, ascending.
    pub edges: Vec<f64>,

    /// Observation count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `data` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The last bin is closed on the right. A constant series is binned over
    /// `[v - 0.5, v + 0.5]`. Non-finite values are ignored.
    ///
    /// # Errors
    /// Fails when `bins` is zero or no finite value is present.
    pub fn new(data: &[f64], bins: usize) -> Result<Self, StatsError> {
        if bins == 0 {
            return Err(StatsError::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        let finite: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(StatsError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let (mut lo, mut hi) = min_max(&finite);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for value in finite {
            let idx = (((value - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Width of each bin.
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Total number of binned observations.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Largest bin count.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Gaussian kernel density estimate with Scott's bandwidth rule.
///
/// The bandwidth is `σ · n^(-1/5)` where `σ` is the sample standard
/// deviation (ddof = 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit the estimator to the finite values in `data`.
    ///
    /// # Errors
    /// Fails with fewer than two finite values or zero variance.
    pub fn new(data: &[f64]) -> Result<Self, StatsError> {
        let points: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
        let n = points.len();
        if n < 2 {
            return Err(StatsError::InsufficientData {
                required: 2,
                actual: n,
            });
        }

        let mean = points.iter().sum::<f64>() / n as f64;
        let var = points.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        if var <= 0.0 {
            return Err(StatsError::ZeroVariance);
        }
        let bandwidth = var.sqrt() * (n as f64).powf(-0.2);

        Ok(Self { points, bandwidth })
    }

    /// Kernel bandwidth.
    pub const fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.points.len() as f64 * h * (2.0 * PI).sqrt());
        norm * self
            .points
            .iter()
            .map(|p| (-0.5 * ((x - p) / h).powi(2)).exp())
            .sum::<f64>()
    }

    /// Density on `n` evenly spaced points over `[lo, hi]`.
    pub fn curve(&self, lo: f64, hi: f64, n: usize) -> Vec<(f64, f64)> {
        match n {
            0 => Vec::new(),
            1 => vec![(lo, self.density(lo))],
            _ => {
                let step = (hi - lo) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = lo + step * i as f64;
                        (x, self.density(x))
                    })
                    .collect()
            }
        }
    }

    /// Density over the observed data range.
    pub fn curve_over_data(&self, n: usize) -> Vec<(f64, f64)> {
        let (lo, hi) = min_max(&self.points);
        self.curve(lo, hi, n)
    }
}

/// Minimum and maximum of a non-empty slice.
pub fn min_max(data: &[f64]) -> (f64, f64) {
    data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_histogram_counts() {
        let data = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let hist = Histogram::new(&data, 5).unwrap();
        assert_eq!(hist.edges.len(), 6);
        assert_relative_eq!(hist.bin_width(), 2.0);
        // [0,2) [2,4) [4,6) [6,8) [8,10]
        assert_eq!(hist.counts, vec![2, 2, 2, 2, 3]);
        assert_eq!(hist.total(), data.len());
        assert_eq!(hist.max_count(), 3);
    }

    #[test]
    fn test_histogram_ignores_nan() {
        let hist = Histogram::new(&[1.0, f64::NAN, 2.0], 2).unwrap();
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_histogram_constant() {
        let hist = Histogram::new(&[3.0, 3.0, 3.0], 4).unwrap();
        assert_relative_eq!(hist.edges[0], 2.5);
        assert_relative_eq!(hist.edges[4], 3.5);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_histogram_errors() {
        assert!(Histogram::new(&[1.0], 0).is_err());
        assert!(Histogram::new(&[f64::NAN], 3).is_err());
    }

    #[test]
    fn test_kde_bandwidth_scott() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let kde = GaussianKde::new(&data).unwrap();
        // σ = sqrt(2.5)
        assert_relative_eq!(
            kde.bandwidth(),
            2.5_f64.sqrt() * 5.0_f64.powf(-0.2),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let data: Vec<f64> = (0..50).map(|i| (i as f64 * 0.37).sin() * 3.0).collect();
        let kde = GaussianKde::new(&data).unwrap();
        let curve = kde.curve(-12.0, 12.0, 2001);
        let dx = 24.0 / 2000.0;
        let area: f64 = curve.iter().map(|(_, y)| y * dx).sum();
        assert_relative_eq!(area, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_kde_symmetric_data() {
        let kde = GaussianKde::new(&[-1.0, 1.0]).unwrap();
        assert_relative_eq!(kde.density(0.5), kde.density(-0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_kde_errors() {
        assert!(matches!(
            GaussianKde::new(&[1.0]),
            Err(StatsError::InsufficientData { .. })
        ));
        assert!(matches!(
            GaussianKde::new(&[2.0, 2.0, 2.0]),
            Err(StatsError::ZeroVariance)
        ));
    }

    #[test]
    fn test_curve_over_data() {
        let kde = GaussianKde::new(&[0.0, 1.0, 4.0]).unwrap();
        let curve = kde.curve_over_data(5);
        assert_eq!(curve.len(), 5);
        assert_relative_eq!(curve[0].0, 0.0);
        assert_relative_eq!(curve[4].0, 4.0);
    }
}
