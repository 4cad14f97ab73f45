#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/seasonality/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cleaner;
pub mod error;
pub mod loader;
pub mod source;
pub mod table;

pub use cleaner::{clean, drop_last_row};
pub use error::{DataError, Result};
pub use loader::{load_source, load_sources};
pub use source::{DEFAULT_DATA_DIR, EnergySeries, SourceSpec};
pub use table::{DATE_COLUMN, RawTable, SeriesTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
