//! Load -> clean -> visualize -> test, run once from top to bottom.

use crate::config::{AnalysisConfig, ConfigError};
use seasonality_data::{DataError, SeriesTable, clean, load_sources};
use seasonality_output::{
    FigureSink, LjungBoxReport, PlotError, ReportError, render_figures, test_autocorrelation,
    write_reports,
};
use std::io::Write;
use thiserror::Error;
use tracing::info;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Loading or cleaning failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A figure could not be rendered or presented.
    #[error(transparent)]
    Plot(#[from] PlotError),

    /// The autocorrelation test failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result of a completed run.
#[derive(Debug)]
pub struct Analysis {
    /// Cleaned series table.
    pub table: SeriesTable,

    /// Per-series Ljung-Box outcome; empty when tests were skipped.
    pub reports: Vec<LjungBoxReport>,
}

/// Analysis pipeline over a validated configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration.
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load every source and clean the joined table.
    pub fn load(&self) -> Result<SeriesTable, PipelineError> {
        let raw = load_sources(&self.config.sources())?;
        let table = clean(raw)?;
        let range = table.date_range()?;
        info!(
            rows = table.height(),
            columns = table.column_names().len(),
            first = ?range.map(|(first, _)| first),
            last = ?range.map(|(_, last)| last),
            "Loaded series table"
        );
        Ok(table)
    }

    /// Render every figure into `sink`.
    pub fn visualize(
        &self,
        table: &SeriesTable,
        sink: &mut dyn FigureSink,
    ) -> Result<(), PipelineError> {
        render_figures(table, &self.config.plot_config(), sink)?;
        Ok(())
    }

    /// Run the Ljung-Box test on every series.
    pub fn test_autocorrelation(
        &self,
        table: &SeriesTable,
    ) -> Result<Vec<LjungBoxReport>, PipelineError> {
        Ok(test_autocorrelation(
            table,
            &self.config.lag_window(),
            self.config.p_value_threshold,
        )?)
    }

    /// Run every stage.
    ///
    /// Figures go to `sink` unless it is `None`; test summaries are written
    /// to `out` unless it is `None`, in which case the tests are skipped.
    pub fn run(
        &self,
        sink: Option<&mut dyn FigureSink>,
        out: Option<&mut dyn Write>,
    ) -> Result<Analysis, PipelineError> {
        let table = self.load()?;

        if let Some(sink) = sink {
            self.visualize(&table, sink)?;
        }

        let reports = match out {
            Some(out) => {
                let reports = self.test_autocorrelation(&table)?;
                write_reports(&reports, out)?;
                reports
            }
            None => Vec::new(),
        };

        Ok(Analysis { table, reports })
    }
}
