//! Correlograms and Ljung-Box results for a few synthetic series.
//!
//! Run with: cargo run -p seasonality-stats --example autocorrelation_demo

use seasonality_stats::{LjungBoxTest, acf_correlogram, lag_window, pacf_correlogram};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Seasonality Autocorrelation Demo ===\n");

    let n = 240;

    // Monthly seasonal pattern
    let seasonal: Vec<f64> = (0..n)
        .map(|i| 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin())
        .collect();

    // AR(1) with a deterministic driver
    let mut ar1 = vec![0.0; n];
    for t in 1..n {
        ar1[t] = 0.7 * ar1[t - 1] + ((t * 7919) % 101) as f64 / 101.0 - 0.5;
    }

    // Linear trend
    let trend: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();

    let lags = lag_window(n);
    println!("Observations: {n}, lag window: {lags}\n");

    for (name, series) in [("seasonal", &seasonal), ("ar1", &ar1), ("trend", &trend)] {
        let acf = acf_correlogram(series, lags, 0.95)?;
        let pacf = pacf_correlogram(series, lags, 0.95)?;
        let table = LjungBoxTest::with_lags(lags)?.test(series)?;

        println!("--- {name} ---");
        println!(
            "  ACF lag 1: {:>7.4}   PACF lag 1: {:>7.4}   PACF lag 2: {:>7.4}",
            acf.values[1], pacf.values[1], pacf.values[2]
        );
        println!("  Significant ACF lags: {:?}", acf.significant_lags());
        println!(
            "  Ljung-Box Q({lags}) = {:.2}, p = {:.3e}, reject: {}\n",
            table.rows[lags - 1].lb_stat,
            table.rows[lags - 1].lb_pvalue,
            table.rejects_null()
        );
    }

    Ok(())
}
