//! Ljung-Box (and Box-Pierce) portmanteau tests for autocorrelation.
//!
//! For lags `k = 1..=L`:
//! ```text
//! Q_LB(k) = n (n + 2) Σ_{j=1}^{k} r_j² / (n - j)
//! Q_BP(k) = n Σ_{j=1}^{k} r_j²
//! ```
//! Both are compared against a χ²(k) distribution. The null hypothesis is
//! that the data are independently distributed; it is rejected at lag `k`
//! when the Ljung-Box p-value falls below the threshold.
//!
//! # References
//! - Ljung, G. M., & Box, G. E. P. (1978). "On a Measure of Lack of Fit in
//!   Time Series Models." Biometrika, 65(2), 297-303.

use crate::autocorrelation::acf;
use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Ljung-Box test configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LjungBoxConfig {
    /// Number of lags tested, `1..=lags`
    pub lags: usize,

    /// P-value below which the null is rejected (default: 0.05)
    pub p_value_threshold: f64,
}

impl Default for LjungBoxConfig {
    fn default() -> Self {
        Self {
            lags: 40,
            p_value_threshold: 0.05,
        }
    }
}

/// Test outcome at a single lag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LjungBoxRow {
    /// Lag (1-based)
    pub lag: usize,
    /// Ljung-Box statistic
    pub lb_stat: f64,
    /// Ljung-Box p-value
    pub lb_pvalue: f64,
    /// Box-Pierce statistic
    pub bp_stat: f64,
    /// Box-Pierce p-value
    pub bp_pvalue: f64,
    /// Whether `lb_pvalue` is below the threshold
    pub reject_null: bool,
}

/// Per-lag results for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LjungBoxTable {
    /// One row per lag, ascending.
    pub rows: Vec<LjungBoxRow>,

    /// Number of observations tested.
    pub n_obs: usize,

    /// Threshold used for `reject_null`.
    pub p_value_threshold: f64,
}

impl LjungBoxTable {
    /// Table of `NaN` statistics for a series with no more observations than
    /// lags. No lag rejects the null.
    pub fn undefined(lags: usize, n_obs: usize, p_value_threshold: f64) -> Self {
        let rows = (1..=lags)
            .map(|lag| LjungBoxRow {
                lag,
                lb_stat: f64::NAN,
                lb_pvalue: f64::NAN,
                bp_stat: f64::NAN,
                bp_pvalue: f64::NAN,
                reject_null: false,
            })
            .collect();
        Self {
            rows,
            n_obs,
            p_value_threshold,
        }
    }

    /// Whether any lag rejects the no-autocorrelation null.
    pub fn rejects_null(&self) -> bool {
        self.rows.iter().any(|row| row.reject_null)
    }

    /// First lag at which the null is rejected.
    pub fn first_rejection(&self) -> Option<usize> {
        self.rows.iter().find(|row| row.reject_null).map(|row| row.lag)
    }
}

/// Ljung-Box tester
#[derive(Debug, Clone)]
pub struct LjungBoxTest {
    config: LjungBoxConfig,
}

impl LjungBoxTest {
    /// Create a tester with the given configuration.
    pub fn new(config: LjungBoxConfig) -> Result<Self, StatsError> {
        if config.lags == 0 {
            return Err(StatsError::InvalidParameter(
                "Ljung-Box needs at least one lag".to_string(),
            ));
        }
        if !(config.p_value_threshold > 0.0 && config.p_value_threshold < 1.0) {
            return Err(StatsError::InvalidParameter(format!(
                "p-value threshold {} must be in (0, 1)",
                config.p_value_threshold
            )));
        }
        Ok(Self { config })
    }

    /// Create a tester for `lags` lags with the default threshold.
    pub fn with_lags(lags: usize) -> Result<Self, StatsError> {
        Self::new(LjungBoxConfig {
            lags,
            ..Default::default()
        })
    }

    /// Current configuration.
    pub const fn config(&self) -> &LjungBoxConfig {
        &self.config
    }

    /// Run the test on a series without missing values.
    ///
    /// # Errors
    /// Fails when the series has no more observations than lags.
    pub fn test(&self, data: &[f64]) -> Result<LjungBoxTable, StatsError> {
        let n = data.len();
        let lags = self.config.lags;
        if n <= lags {
            return Err(StatsError::InsufficientData {
                required: lags + 1,
                actual: n,
            });
        }

        let r = acf(data, lags)?;
        let n_f = n as f64;

        let mut lb_sum = 0.0;
        let mut bp_sum = 0.0;
        let mut rows = Vec::with_capacity(lags);
        for lag in 1..=lags {
            let r2 = r[lag] * r[lag];
            lb_sum += r2 / (n - lag) as f64;
            bp_sum += r2;

            let lb_stat = n_f * (n_f + 2.0) * lb_sum;
            let bp_stat = n_f * bp_sum;
            let lb_pvalue = chi2_survival(lb_stat, lag)?;
            let bp_pvalue = chi2_survival(bp_stat, lag)?;

            rows.push(LjungBoxRow {
                lag,
                lb_stat,
                lb_pvalue,
                bp_stat,
                bp_pvalue,
                reject_null: lb_pvalue < self.config.p_value_threshold,
            });
        }

        Ok(LjungBoxTable {
            rows,
            n_obs: n,
            p_value_threshold: self.config.p_value_threshold,
        })
    }
}

/// Upper-tail probability of χ²(df) at `x`; `NaN` statistics give `NaN`.
fn chi2_survival(x: f64, df: usize) -> Result<f64, StatsError> {
    if x.is_nan() {
        return Ok(f64::NAN);
    }
    let chi2 = ChiSquared::new(df as f64).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(chi2.sf(x))
}
