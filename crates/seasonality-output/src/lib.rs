#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/seasonality/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod plot;
pub mod report;

pub use error::{PlotError, ReportError};
pub use plot::{
    Figure, FigureSink, GridLayout, MemorySink, PlotConfig, SvgDirectorySink, render_figures,
};
pub use report::{LjungBoxReport, test_autocorrelation, write_reports};
