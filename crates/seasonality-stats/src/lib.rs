#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/seasonality/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod autocorrelation;
pub mod correlation;
pub mod distribution;
pub mod error;
pub mod ljung_box;
pub mod window;

// Re-export main types
pub use autocorrelation::{Correlogram, acf, acf_correlogram, pacf, pacf_correlogram};
pub use correlation::{correlation_matrix, pearson};
pub use distribution::{GaussianKde, Histogram};
pub use error::StatsError;
pub use ljung_box::{LjungBoxConfig, LjungBoxRow, LjungBoxTable, LjungBoxTest};
pub use window::{LagWindowConfig, histogram_bins, lag_window};
