//! Console report of the Ljung-Box autocorrelation test.
//!
//! For each series the report is a single line when the no-autocorrelation
//! null is rejected at any lag, and the full per-lag table otherwise.

use crate::error::ReportError;
use seasonality_data::SeriesTable;
use seasonality_stats::{
    LagWindowConfig, LjungBoxConfig, LjungBoxTable, LjungBoxTest, StatsError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::{info, warn};

/// Ljung-Box outcome for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LjungBoxReport {
    /// Series name.
    pub column: String,

    /// Per-lag test results.
    pub table: LjungBoxTable,
}

impl LjungBoxReport {
    /// Whether the null is rejected at any lag.
    pub fn rejects_null(&self) -> bool {
        self.table.rejects_null()
    }

    /// The user-facing summary for this series.
    pub fn summary(&self) -> String {
        if self.rejects_null() {
            format!("Reject the null hypothesis for {}: autocorrelation", self.column)
        } else {
            format!("Test Results ({}):\n{}", self.column, self)
        }
    }
}

impl fmt::Display for LjungBoxReport {
    /// Per-lag table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "lag", "lb_stat", "lb_pvalue", "bp_stat", "bp_pvalue", "reject_null"
        )?;
        writeln!(f, "{}", "-".repeat(69))?;
        for row in &self.table.rows {
            writeln!(
                f,
                "{:>4} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12}",
                row.lag, row.lb_stat, row.lb_pvalue, row.bp_stat, row.bp_pvalue, row.reject_null
            )?;
        }
        Ok(())
    }
}

/// Run the Ljung-Box test on every series of the table.
///
/// The lag window is derived from the table height; each series is tested on
/// its observed values only. A series with no more observations than lags
/// gets a table of `NaN` statistics that never rejects.
///
/// # Errors
/// Fails when the lag window is 0.
pub fn test_autocorrelation(
    table: &SeriesTable,
    window: &LagWindowConfig,
    p_value_threshold: f64,
) -> Result<Vec<LjungBoxReport>, ReportError> {
    let lags = window.window(table.height());
    let tester = LjungBoxTest::new(LjungBoxConfig {
        lags,
        p_value_threshold,
    })?;

    let mut reports = Vec::with_capacity(table.column_names().len());
    for column in table.column_names() {
        let observed = table.observed(column)?;
        let result = match tester.test(&observed) {
            Ok(result) => result,
            Err(StatsError::InsufficientData { .. }) => {
                warn!(
                    column = %column,
                    lags,
                    n_obs = observed.len(),
                    "Too few observations for Ljung-Box"
                );
                LjungBoxTable::undefined(lags, observed.len(), p_value_threshold)
            }
            Err(err) => return Err(err.into()),
        };
        info!(
            column = %column,
            lags,
            n_obs = result.n_obs,
            reject_null = result.rejects_null(),
            first_rejection = ?result.first_rejection(),
            "Ljung-Box test"
        );
        reports.push(LjungBoxReport {
            column: column.clone(),
            table: result,
        });
    }
    Ok(reports)
}

/// Write each report's summary to `out`, one block per series.
pub fn write_reports(reports: &[LjungBoxReport], out: &mut dyn Write) -> Result<(), ReportError> {
    for report in reports {
        writeln!(out, "{}", report.summary())?;
    }
    Ok(())
}
