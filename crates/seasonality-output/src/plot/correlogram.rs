use super::{CAPTION_FONT, Figure, GridLayout, PlotConfig, SERIES_COLOR, render_svg};
use crate::error::PlotError;
use plotters::prelude::*;
use seasonality_data::SeriesTable;
use seasonality_stats::{Correlogram, StatsError, acf_correlogram, pacf_correlogram};
use tracing::warn;

type Estimator = fn(&[f64], usize, f64) -> Result<Correlogram, StatsError>;

/// Autocorrelation stems with a Bartlett confidence band, one panel per series.
pub fn acf_figure(table: &SeriesTable, config: &PlotConfig) -> Result<Figure, PlotError> {
    correlogram_figure(table, config, config.acf, "acf", "ACF", acf_correlogram)
}

/// Partial autocorrelation stems with a `z / sqrt(n)` band, one panel per series.
pub fn pacf_figure(table: &SeriesTable, config: &PlotConfig) -> Result<Figure, PlotError> {
    correlogram_figure(table, config, config.pacf, "pacf", "PACF", pacf_correlogram)
}

fn correlogram_figure(
    table: &SeriesTable,
    config: &PlotConfig,
    grid: GridLayout,
    name: &str,
    suffix: &str,
    estimate: Estimator,
) -> Result<Figure, PlotError> {
    let columns = table.column_names();
    grid.ensure_fits(columns.len())?;

    let lags = config.lag_window.window(table.height());
    if lags == 0 {
        return Err(StatsError::InvalidParameter(format!(
            "lag window is 0 for {} rows",
            table.height()
        ))
        .into());
    }

    let mut correlograms = Vec::with_capacity(columns.len());
    for column in columns {
        let observed = table.observed(column)?;
        let correlogram = match estimate(&observed, lags, config.confidence_level) {
            Ok(correlogram) => correlogram,
            Err(StatsError::InsufficientData { .. }) => {
                warn!(
                    column = %column,
                    lags,
                    n_obs = observed.len(),
                    "Too few observations for {suffix}; drawing an empty panel"
                );
                Correlogram::undefined(lags, observed.len())
            }
            Err(err) => return Err(err.into()),
        };
        correlograms.push((format!("{column} {suffix}"), correlogram));
    }

    let svg = render_svg(config.size(), |root| {
        let panels = root.split_evenly((grid.rows, grid.cols));
        for ((title, correlogram), panel) in correlograms.iter().zip(&panels) {
            draw_correlogram(panel, title, correlogram)?;
        }
        Ok(())
    })?;

    Ok(Figure {
        name: name.to_string(),
        svg,
    })
}

fn draw_correlogram(
    panel: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    title: &str,
    correlogram: &Correlogram,
) -> Result<(), PlotError> {
    let max_lag = correlogram.max_lag() as f64;
    let mut chart = ChartBuilder::on(panel)
        .caption(title, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-1.0..max_lag + 1.0, -1.1..1.1)?;
    chart.configure_mesh().x_desc("Lag").draw()?;

    // Band is drawn from lag 1; lag 0 is 1 by construction.
    let upper = correlogram
        .band
        .iter()
        .enumerate()
        .skip(1)
        .map(|(lag, half)| (lag as f64, *half));
    let lower = correlogram
        .band
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .map(|(lag, half)| (lag as f64, -half));
    let band: Vec<(f64, f64)> = upper.chain(lower).collect();
    if band.len() > 2 && band.iter().all(|(_, half)| half.is_finite()) {
        chart.draw_series(std::iter::once(Polygon::new(
            band,
            SERIES_COLOR.mix(0.15).filled(),
        )))?;
    }

    chart.draw_series(LineSeries::new(
        vec![(-1.0, 0.0), (max_lag + 1.0, 0.0)],
        &BLACK,
    ))?;

    let stems: Vec<(f64, f64)> = correlogram
        .values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(lag, value)| (lag as f64, *value))
        .collect();
    chart.draw_series(
        stems
            .iter()
            .map(|&(lag, value)| PathElement::new(vec![(lag, 0.0), (lag, value)], &SERIES_COLOR)),
    )?;
    chart.draw_series(
        stems
            .iter()
            .map(|&point| Circle::new(point, 4, SERIES_COLOR.filled())),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn table(n: usize) -> SeriesTable {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let dates = (0..n).map(|i| start + Duration::days(i as i64)).collect();
        let mut level = 0.0;
        let values = (0..n)
            .map(|i| {
                level = 0.6 * level + ((i * 37) % 17) as f64 - 8.0;
                Some(level)
            })
            .collect();
        SeriesTable::from_columns(dates, vec![("ar".to_string(), values)]).unwrap()
    }

    #[test]
    fn test_acf_and_pacf_titles() {
        let config = PlotConfig {
            width: 500,
            height: 500,
            ..Default::default()
        };
        let data = table(60);

        let acf = acf_figure(&data, &config).unwrap();
        assert_eq!(acf.name, "acf");
        assert!(acf.svg.contains("ar ACF"));

        let pacf = pacf_figure(&data, &config).unwrap();
        assert_eq!(pacf.name, "pacf");
        assert!(pacf.svg.contains("ar PACF"));
    }

    #[test]
    fn test_short_series_draws_empty_panel() {
        let config = PlotConfig {
            width: 500,
            height: 500,
            ..Default::default()
        };
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let dates = (0..100).map(|i| start + Duration::days(i)).collect();
        let dense = (0..100).map(|i| Some(((i * 37) % 17) as f64)).collect();
        let sparse = (0..100)
            .map(|i| (i >= 95).then_some(i as f64))
            .collect();
        let data = SeriesTable::from_columns(
            dates,
            vec![("dense".to_string(), dense), ("sparse".to_string(), sparse)],
        )
        .unwrap();

        let acf = acf_figure(&data, &config).unwrap();
        assert!(acf.svg.contains("sparse ACF"));
        let pacf = pacf_figure(&data, &config).unwrap();
        assert!(pacf.svg.contains("sparse PACF"));
    }

    #[test]
    fn test_zero_lag_window_is_error() {
        let config = PlotConfig::default();
        assert!(matches!(
            acf_figure(&table(4), &config),
            Err(PlotError::Stats(StatsError::InvalidParameter(_)))
        ));
    }
}
