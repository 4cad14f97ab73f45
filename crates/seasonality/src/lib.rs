#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/seasonality/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod pipeline;

// Re-export main types from sub-crates
pub use seasonality_data as data;
pub use seasonality_output as output;
pub use seasonality_stats as stats;

pub use config::{AnalysisConfig, ConfigError, DEFAULT_OUTPUT_DIR};
pub use pipeline::{Analysis, Pipeline, PipelineError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
