use super::{Figure, PlotConfig, SERIES_COLOR, padded_range, render_svg};
use crate::error::PlotError;
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use seasonality_data::SeriesTable;

/// Figure title of the stacked time-series panel.
pub const TIME_SERIES_TITLE: &str = "Energy Sector Data";

/// One stacked line plot per series, all sharing the date axis.
///
/// Gaps in a series break its line.
pub fn time_series_figure(table: &SeriesTable, config: &PlotConfig) -> Result<Figure, PlotError> {
    let columns = table.column_names();
    config.time_series.ensure_fits(columns.len())?;

    let dates = table.dates()?;
    let (start, end) = match table.date_range()? {
        Some((start, end)) if start < end => (start, end),
        Some((start, _)) => (start, start + Duration::days(1)),
        None => {
            let epoch = NaiveDate::default();
            (epoch, epoch + Duration::days(1))
        }
    };

    let mut series = Vec::with_capacity(columns.len());
    for name in columns {
        series.push((name.as_str(), table.values(name)?));
    }

    let svg = render_svg(config.size(), |root| {
        let body = root.titled(TIME_SERIES_TITLE, ("sans-serif", 40))?;
        let panels = body.split_evenly((config.time_series.rows, config.time_series.cols));

        for ((name, values), panel) in series.iter().zip(&panels) {
            let observed: Vec<f64> = values.iter().flatten().copied().collect();
            let (lo, hi) = padded_range(&observed);

            let mut chart = ChartBuilder::on(panel)
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(90)
                .build_cartesian_2d(start..end, lo..hi)?;
            chart
                .configure_mesh()
                .y_desc(*name)
                .x_labels(10)
                .y_labels(5)
                .draw()?;

            for segment in segments(&dates, values) {
                chart.draw_series(LineSeries::new(segment, SERIES_COLOR.stroke_width(2)))?;
            }
        }
        Ok(())
    })?;

    Ok(Figure {
        name: "time_series".to_string(),
        svg,
    })
}

/// Runs of consecutive observed points.
fn segments(dates: &[NaiveDate], values: &[Option<f64>]) -> Vec<Vec<(NaiveDate, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (date, value) in dates.iter().zip(values) {
        match value {
            Some(v) if v.is_finite() => current.push((*date, *v)),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::GridLayout;

    fn month(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, 1).unwrap()
    }

    #[test]
    fn test_segments_split_on_gaps() {
        let dates: Vec<_> = (1..=6).map(month).collect();
        let values = vec![Some(1.0), Some(2.0), None, Some(4.0), None, Some(6.0)];
        let runs = segments(&dates, &values);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], vec![(month(1), 1.0), (month(2), 2.0)]);
        assert_eq!(runs[1], vec![(month(4), 4.0)]);
        assert_eq!(runs[2], vec![(month(6), 6.0)]);
    }

    #[test]
    fn test_figure_has_title_and_labels() {
        let table = SeriesTable::from_columns(
            (1..=6).map(month).collect(),
            vec![
                (
                    "alpha".to_string(),
                    vec![Some(1.0), Some(3.0), None, Some(2.0), Some(5.0), Some(4.0)],
                ),
                (
                    "beta".to_string(),
                    vec![None, Some(1.0), Some(1.5), Some(2.0), Some(2.5), Some(3.0)],
                ),
            ],
        )
        .unwrap();
        let config = PlotConfig {
            width: 600,
            height: 600,
            ..Default::default()
        };

        let figure = time_series_figure(&table, &config).unwrap();
        assert_eq!(figure.name, "time_series");
        assert!(figure.svg.contains(TIME_SERIES_TITLE));
        assert!(figure.svg.contains("alpha"));
        assert!(figure.svg.contains("beta"));
    }

    #[test]
    fn test_grid_too_small() {
        let table = SeriesTable::from_columns(
            vec![month(1), month(2)],
            vec![
                ("a".to_string(), vec![Some(1.0), Some(2.0)]),
                ("b".to_string(), vec![Some(1.0), Some(2.0)]),
            ],
        )
        .unwrap();
        let config = PlotConfig {
            time_series: GridLayout::new(1, 1),
            ..Default::default()
        };
        assert!(matches!(
            time_series_figure(&table, &config),
            Err(PlotError::GridTooSmall { needed: 2, .. })
        ));
    }
}
