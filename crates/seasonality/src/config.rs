//! Analysis configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! { "data_dir": "data/energy_data", "max_lags": 24, "acf": { "rows": 2, "cols": 3 } }
//! ```

use seasonality_data::{DEFAULT_DATA_DIR, EnergySeries, SourceSpec};
use seasonality_output::{GridLayout, PlotConfig};
use seasonality_stats::{LagWindowConfig, LjungBoxConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default directory figures are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "figures";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Configuration of a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding the six source CSV files (default: data/energy_data)
    pub data_dir: PathBuf,

    /// Directory figures are written to (default: figures)
    pub output_dir: PathBuf,

    /// Grid of the stacked time-series panel (default: 6x1)
    pub time_series: GridLayout,

    /// Grid of the histogram figure (default: 3x2)
    pub histogram: GridLayout,

    /// Grid of the ACF figure (default: 3x2)
    pub acf: GridLayout,

    /// Grid of the PACF figure (default: 3x2)
    pub pacf: GridLayout,

    /// Upper bound on the lag window (default: 40)
    pub max_lags: usize,

    /// Rows per lag in the lag window (default: 5)
    pub lag_divisor: usize,

    /// Ljung-Box p-value threshold (default: 0.05)
    pub p_value_threshold: f64,

    /// Confidence level of the ACF/PACF bands (default: 0.95)
    pub confidence_level: f64,

    /// Figure width in pixels (default: 2000)
    pub figure_width: u32,

    /// Figure height in pixels (default: 2000)
    pub figure_height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let plot = PlotConfig::default();
        let window = LagWindowConfig::default();
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            time_series: plot.time_series,
            histogram: plot.histogram,
            acf: plot.acf,
            pacf: plot.pacf,
            max_lags: window.max_lags,
            lag_divisor: window.divisor,
            p_value_threshold: LjungBoxConfig::default().p_value_threshold,
            confidence_level: plot.confidence_level,
            figure_width: plot.width,
            figure_height: plot.height,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Pretty JSON representation.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lags == 0 {
            return Err(ConfigError::Invalid("max_lags must be positive".into()));
        }
        if self.lag_divisor == 0 {
            return Err(ConfigError::Invalid("lag_divisor must be positive".into()));
        }
        if !(self.p_value_threshold > 0.0 && self.p_value_threshold < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "p_value_threshold {} must be in (0, 1)",
                self.p_value_threshold
            )));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "confidence_level {} must be in (0, 1)",
                self.confidence_level
            )));
        }
        if self.figure_width == 0 || self.figure_height == 0 {
            return Err(ConfigError::Invalid(
                "figure dimensions must be positive".into(),
            ));
        }
        for (name, grid) in [
            ("time_series", self.time_series),
            ("histogram", self.histogram),
            ("acf", self.acf),
            ("pacf", self.pacf),
        ] {
            if grid.rows == 0 || grid.cols == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} grid must have at least one row and column"
                )));
            }
        }
        Ok(())
    }

    /// Source files under `data_dir`, in column order.
    pub fn sources(&self) -> Vec<SourceSpec> {
        EnergySeries::sources(&self.data_dir)
    }

    /// Lag window shared by the correlograms and the Ljung-Box test.
    pub const fn lag_window(&self) -> LagWindowConfig {
        LagWindowConfig {
            max_lags: self.max_lags,
            divisor: self.lag_divisor,
        }
    }

    /// Rendering options for the figures.
    pub const fn plot_config(&self) -> PlotConfig {
        PlotConfig {
            width: self.figure_width,
            height: self.figure_height,
            time_series: self.time_series,
            histogram: self.histogram,
            acf: self.acf,
            pacf: self.pacf,
            lag_window: self.lag_window(),
            confidence_level: self.confidence_level,
        }
    }
}
