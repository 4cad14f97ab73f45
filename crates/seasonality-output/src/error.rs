//! Error types for figure rendering and reporting.

use plotters::drawing::DrawingAreaErrorKind;
use seasonality_data::DataError;
use seasonality_stats::StatsError;
use thiserror::Error;

/// Errors that can occur while rendering or presenting figures.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Drawing backend failure.
    #[error("Render error: {0}")]
    Render(String),

    /// Failed to write a figure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The subplot grid cannot hold every series.
    #[error("{rows}x{cols} grid is too small for {needed} series")]
    GridTooSmall {
        /// Grid rows
        rows: usize,
        /// Grid columns
        cols: usize,
        /// Number of panels required
        needed: usize,
    },

    /// A statistic behind a figure could not be computed.
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// The table could not be read.
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(err.to_string())
    }
}

/// Errors that can occur while running the autocorrelation report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The test could not be run.
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// The table could not be read.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Failed to write the report.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
