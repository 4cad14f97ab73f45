//! Renders every figure for a synthetic table and prints the Ljung-Box report.
//!
//! Run with: cargo run -p seasonality-output --example render_demo

use chrono::{Duration, NaiveDate};
use seasonality_data::SeriesTable;
use seasonality_output::{
    PlotConfig, SvgDirectorySink, render_figures, test_autocorrelation, write_reports,
};
use seasonality_stats::LagWindowConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Seasonality Figure Demo ===\n");

    let n = 180;
    let start = NaiveDate::from_ymd_opt(2010, 1, 1).ok_or("invalid start date")?;
    let dates = (0..n).map(|i| start + Duration::days(30 * i)).collect();

    let seasonal = (0..n)
        .map(|i| Some(100.0 + 12.0 * (i as f64 * std::f64::consts::PI / 6.0).sin()))
        .collect();
    let noise = (0..n)
        .map(|i| Some(((i * 7919 + 13) % 97) as f64 / 97.0))
        .collect();
    let table = SeriesTable::from_columns(
        dates,
        vec![
            ("seasonal".to_string(), seasonal),
            ("noise".to_string(), noise),
        ],
    )?;

    let out_dir = std::env::temp_dir().join("seasonality_demo");
    let mut sink = SvgDirectorySink::new(&out_dir)?;
    render_figures(&table, &PlotConfig::default(), &mut sink)?;

    println!("Figures written to {}:", sink.dir().display());
    for path in sink.written() {
        println!("  {}", path.display());
    }
    println!();

    let reports = test_autocorrelation(&table, &LagWindowConfig::default(), 0.05)?;
    write_reports(&reports, &mut std::io::stdout())?;

    Ok(())
}
