//! Sample autocorrelation (ACF) and partial autocorrelation (PACF).
//!
//! The ACF uses the biased estimator
//! ```text
//! r_k = Σ_{t=k}^{n-1} (x_t - x̄)(x_{t-k} - x̄) / Σ_{t=0}^{n-1} (x_t - x̄)²
//! ```
//! and the PACF solves the Yule-Walker equations on that ACF with the
//! Durbin-Levinson recursion.
//!
//! Confidence bands are centred on zero. For the ACF the half-width at lag
//! `k` follows Bartlett's formula `z * sqrt((1 + 2 Σ_{j<k} r_j²) / n)`; for
//! the PACF it is `z / sqrt(n)`.

use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Correlogram values with their zero-centred confidence band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlogram {
    /// Coefficient for lags `0..=max_lag`.
    pub values: Vec<f64>,

    /// Half-width of the confidence band per lag (0 at lag 0).
    pub band: Vec<f64>,

    /// Number of observations used.
    pub n_obs: usize,
}

impl Correlogram {
    /// All-`NaN` correlogram for a series too short to estimate `max_lag` lags.
    pub fn undefined(max_lag: usize, n_obs: usize) -> Self {
        let mut band = vec![f64::NAN; max_lag + 1];
        band[0] = 0.0;
        Self {
            values: vec![f64::NAN; max_lag + 1],
            band,
            n_obs,
        }
    }

    /// Largest lag in the correlogram.
    pub fn max_lag(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Lags `>= 1` whose coefficient lies outside the band.
    pub fn significant_lags(&self) -> Vec<usize> {
        self.values
            .iter()
            .zip(&self.band)
            .enumerate()
            .skip(1)
            .filter(|(_, (value, band))| value.abs() > **band)
            .map(|(lag, _)| lag)
            .collect()
    }
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Autocorrelation for lags `0..=max_lag`.
///
/// A constant series yields `NaN` at every lag.
///
/// # Errors
/// Fails when `max_lag >= data.len()`.
pub fn acf(data: &[f64], max_lag: usize) -> Result<Vec<f64>, StatsError> {
    let n = data.len();
    if max_lag >= n {
        return Err(StatsError::InsufficientData {
            required: max_lag + 1,
            actual: n,
        });
    }

    let m = mean(data);
    let centered: Vec<f64> = data.iter().map(|x| x - m).collect();
    let denom: f64 = centered.iter().map(|x| x * x).sum();

    Ok((0..=max_lag)
        .map(|lag| {
            let num: f64 = centered[lag..]
                .iter()
                .zip(&centered[..n - lag])
                .map(|(a, b)| a * b)
                .sum();
            num / denom
        })
        .collect())
}

/// Partial autocorrelation for lags `0..=max_lag` (Durbin-Levinson on the biased ACF).
///
/// # Errors
/// Fails when `max_lag >= data.len()`.
pub fn pacf(data: &[f64], max_lag: usize) -> Result<Vec<f64>, StatsError> {
    let r = acf(data, max_lag)?;
    Ok(durbin_levinson(&r))
}

/// Partial autocorrelations from autocorrelations `r[0..=p]`.
fn durbin_levinson(r: &[f64]) -> Vec<f64> {
    let max_lag = r.len().saturating_sub(1);
    let mut pacf = vec![f64::NAN; max_lag + 1];
    if r.is_empty() {
        return pacf;
    }
    pacf[0] = 1.0;
    if max_lag == 0 || r[0].is_nan() {
        return pacf;
    }

    let mut phi = vec![0.0; max_lag + 1];
    let mut prev = vec![0.0; max_lag + 1];
    let mut sigma: f64 = 1.0;

    for k in 1..=max_lag {
        let num = r[k] - (1..k).map(|j| prev[j] * r[k - j]).sum::<f64>();
        if sigma.abs() < 1e-12 {
            break;
        }
        let reflection = num / sigma;
        phi[k] = reflection;
        for j in 1..k {
            phi[j] = prev[j] - reflection * prev[k - j];
        }
        sigma *= 1.0 - reflection * reflection;
        pacf[k] = reflection;
        prev[..=k].copy_from_slice(&phi[..=k]);
    }

    pacf
}

/// Two-sided standard normal quantile for a confidence level in (0, 1).
///
/// # Errors
/// Fails for levels outside (0, 1).
pub fn normal_quantile(confidence: f64) -> Result<f64, StatsError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(StatsError::InvalidParameter(format!(
            "confidence level {confidence} must be in (0, 1)"
        )));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}

/// ACF with Bartlett confidence band.
///
/// # Errors
/// Fails when `max_lag >= data.len()` or the confidence level is invalid.
pub fn acf_correlogram(
    data: &[f64],
    max_lag: usize,
    confidence: f64,
) -> Result<Correlogram, StatsError> {
    let z = normal_quantile(confidence)?;
    let values = acf(data, max_lag)?;
    let n = data.len() as f64;

    let mut band = Vec::with_capacity(values.len());
    let mut cumulative = 0.0;
    for (lag, value) in values.iter().enumerate() {
        band.push(if lag == 0 {
            0.0
        } else {
            z * ((1.0 + 2.0 * cumulative) / n).sqrt()
        });
        if lag >= 1 {
            cumulative += value * value;
        }
    }

    Ok(Correlogram {
        values,
        band,
        n_obs: data.len(),
    })
}

/// PACF with `z / sqrt(n)` confidence band.
///
/// # Errors
/// Fails when `max_lag >= data.len()` or the confidence level is invalid.
pub fn pacf_correlogram(
    data: &[f64],
    max_lag: usize,
    confidence: f64,
) -> Result<Correlogram, StatsError> {
    let z = normal_quantile(confidence)?;
    let values = pacf(data, max_lag)?;
    let half_width = z / (data.len() as f64).sqrt();
    let band = (0..values.len())
        .map(|lag| if lag == 0 { 0.0 } else { half_width })
        .collect();

    Ok(Correlogram {
        values,
        band,
        n_obs: data.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ar1(phi: f64, n: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(0x2545_F491);
        let mut x = vec![0.0; n];
        for t in 1..n {
            x[t] = phi * x[t - 1] + rng.gen_range(-0.5_f64..0.5);
        }
        x
    }

    #[test]
    fn test_acf_lag_zero_is_one() {
        let data = vec![1.0, 3.0, 2.0, 5.0, 4.0];
        let r = acf(&data, 2).unwrap();
        assert_relative_eq!(r[0], 1.0);
    }

    #[test]
    fn test_acf_known_values() {
        // x̄ = 2.5, centred = [-1.5, -0.5, 0.5, 1.5], Σc² = 5
        // r1 = (0.75 - 0.25 + 0.75) / 5 = 0.25
        // r2 = (-0.75 - 0.75) / 5 = -0.3
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let r = acf(&data, 2).unwrap();
        assert_relative_eq!(r[1], 0.25, epsilon = 1e-12);
        assert_relative_eq!(r[2], -0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_acf_constant_series_is_nan() {
        let r = acf(&[2.0; 10], 3).unwrap();
        assert!(r.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_acf_too_many_lags() {
        assert!(matches!(
            acf(&[1.0, 2.0, 3.0], 3),
            Err(StatsError::InsufficientData {
                required: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_pacf_lag_one_equals_acf_lag_one() {
        let data = ar1(0.6, 300);
        let r = acf(&data, 5).unwrap();
        let p = pacf(&data, 5).unwrap();
        assert_relative_eq!(p[0], 1.0);
        assert_relative_eq!(p[1], r[1], epsilon = 1e-12);
    }

    #[test]
    fn test_pacf_lag_two_formula() {
        let data = ar1(0.5, 200);
        let r = acf(&data, 2).unwrap();
        let p = pacf(&data, 2).unwrap();
        let expected = (r[2] - r[1] * r[1]) / (1.0 - r[1] * r[1]);
        assert_relative_eq!(p[2], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pacf_ar1_cuts_off() {
        let data = ar1(0.8, 2000);
        let p = pacf(&data, 5).unwrap();
        assert!((p[1] - 0.8).abs() < 0.1);
        for value in &p[2..] {
            assert!(value.abs() < 0.1);
        }
    }

    #[test]
    fn test_normal_quantile() {
        assert_relative_eq!(normal_quantile(0.95).unwrap(), 1.959964, epsilon = 1e-5);
        assert!(normal_quantile(1.0).is_err());
        assert!(normal_quantile(0.0).is_err());
    }

    #[test]
    fn test_acf_band_bartlett() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let c = acf_correlogram(&data, 2, 0.95).unwrap();
        let z = normal_quantile(0.95).unwrap();
        assert_relative_eq!(c.band[0], 0.0);
        assert_relative_eq!(c.band[1], z * (1.0_f64 / 4.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            c.band[2],
            z * ((1.0 + 2.0 * 0.0625) / 4.0_f64).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(c.max_lag(), 2);
    }

    #[test]
    fn test_pacf_band_constant() {
        let data = ar1(0.3, 100);
        let c = pacf_correlogram(&data, 10, 0.95).unwrap();
        let expected = normal_quantile(0.95).unwrap() / 10.0;
        assert_relative_eq!(c.band[0], 0.0);
        for band in &c.band[1..] {
            assert_relative_eq!(*band, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_undefined_correlogram() {
        let c = Correlogram::undefined(4, 3);
        assert_eq!(c.max_lag(), 4);
        assert_eq!(c.n_obs, 3);
        assert!(c.values.iter().all(|v| v.is_nan()));
        assert_relative_eq!(c.band[0], 0.0);
        assert!(c.significant_lags().is_empty());
    }

    #[test]
    fn test_significant_lags_for_persistent_series() {
        let data = ar1(0.9, 500);
        let c = acf_correlogram(&data, 3, 0.95).unwrap();
        assert_eq!(c.significant_lags(), vec![1, 2, 3]);
    }
}
