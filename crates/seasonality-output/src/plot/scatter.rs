use super::{Figure, PlotConfig, SERIES_COLOR, padded_range, render_svg};
use crate::error::PlotError;
use plotters::prelude::*;
use seasonality_data::SeriesTable;
use seasonality_stats::GaussianKde;
use tracing::warn;

const KDE_POINTS: usize = 100;
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);

/// Pairwise scatter plots with a KDE curve on the diagonal.
///
/// Panel `(i, j)` plots series `j` on x against series `i` on y, using the
/// rows where both are observed. Only the bottom row and left column carry
/// axis descriptions.
pub fn scatter_matrix(table: &SeriesTable, config: &PlotConfig) -> Result<Figure, PlotError> {
    let columns = table.column_names();
    let k = columns.len();

    let mut values = Vec::with_capacity(k);
    let mut ranges = Vec::with_capacity(k);
    let mut densities = Vec::with_capacity(k);
    for name in columns {
        let column = table.values(name)?;
        let observed: Vec<f64> = column.iter().flatten().copied().collect();
        let range = padded_range(&observed);
        let density = match GaussianKde::new(&observed) {
            Ok(kde) => kde.curve(range.0, range.1, KDE_POINTS),
            Err(err) => {
                warn!(column = %name, error = %err, "Skipping diagonal density");
                Vec::new()
            }
        };
        values.push(column);
        ranges.push(range);
        densities.push(density);
    }

    let svg = render_svg(config.size(), |root| {
        if k == 0 {
            return Ok(());
        }
        let panels = root.split_evenly((k, k));

        for (idx, panel) in panels.iter().enumerate() {
            let (row, col) = (idx / k, idx % k);
            let (x_lo, x_hi) = ranges[col];

            let mut builder = ChartBuilder::on(panel);
            builder
                .margin(4)
                .x_label_area_size(if row + 1 == k { 40 } else { 0 })
                .y_label_area_size(if col == 0 { 60 } else { 0 });

            if row == col {
                let y_hi = densities[col]
                    .iter()
                    .map(|(_, d)| *d)
                    .fold(0.0_f64, f64::max)
                    .max(f64::MIN_POSITIVE)
                    * 1.05;
                let mut chart = builder.build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;
                chart
                    .configure_mesh()
                    .x_desc(axis_label(columns, col, row + 1 == k))
                    .y_desc(axis_label(columns, row, col == 0))
                    .x_labels(4)
                    .y_labels(4)
                    .label_style(LABEL_FONT)
                    .draw()?;
                chart.draw_series(LineSeries::new(
                    densities[col].iter().copied(),
                    SERIES_COLOR.stroke_width(2),
                ))?;
            } else {
                let (y_lo, y_hi) = ranges[row];
                let mut chart = builder.build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
                chart
                    .configure_mesh()
                    .x_desc(axis_label(columns, col, row + 1 == k))
                    .y_desc(axis_label(columns, row, col == 0))
                    .x_labels(4)
                    .y_labels(4)
                    .label_style(LABEL_FONT)
                    .draw()?;
                chart.draw_series(
                    pairs(&values[col], &values[row])
                        .map(|point| Circle::new(point, 2, SERIES_COLOR.mix(0.5).filled())),
                )?;
            }
        }
        Ok(())
    })?;

    Ok(Figure {
        name: "scatter_matrix".to_string(),
        svg,
    })
}

fn axis_label(columns: &[String], idx: usize, visible: bool) -> String {
    if visible {
        columns[idx].clone()
    } else {
        String::new()
    }
}

/// Points where both series are observed.
fn pairs<'a>(
    x: &'a [Option<f64>],
    y: &'a [Option<f64>],
) -> impl Iterator<Item = (f64, f64)> + 'a {
    x.iter().zip(y).filter_map(|pair| match pair {
        (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((*a, *b)),
        _ => None,
    })
}
