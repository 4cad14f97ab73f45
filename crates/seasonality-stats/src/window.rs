//! Derived sizes: lag window and histogram bin count.

use serde::{Deserialize, Serialize};

/// Configuration of the lag window used for ACF/PACF plots and Ljung-Box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LagWindowConfig {
    /// Upper bound on the number of lags (default: 40)
    pub max_lags: usize,

    /// Rows per lag; the window is `rows / divisor` when below the cap (default: 5)
    pub divisor: usize,
}

impl Default for LagWindowConfig {
    fn default() -> Self {
        Self {
            max_lags: 40,
            divisor: 5,
        }
    }
}

impl LagWindowConfig {
    /// Lag window for a table with `n_rows` rows: `min(max_lags, n_rows / divisor)`.
    ///
    /// A zero divisor yields `max_lags`.
    pub fn window(&self, n_rows: usize) -> usize {
        n_rows
            .checked_div(self.divisor)
            .map_or(self.max_lags, |per_lag| per_lag.min(self.max_lags))
    }
}

/// Lag window with the default configuration: `min(40, n_rows / 5)`.
pub fn lag_window(n_rows: usize) -> usize {
    LagWindowConfig::default().window(n_rows)
}

/// Histogram bin count: `floor(sqrt(n_rows))`.
pub const fn histogram_bins(n_rows: usize) -> usize {
    n_rows.isqrt()
}
