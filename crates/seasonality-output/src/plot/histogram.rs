use super::{CAPTION_FONT, Figure, PlotConfig, SERIES_COLOR, padded_range, render_svg};
use crate::error::PlotError;
use plotters::prelude::*;
use seasonality_data::SeriesTable;
use seasonality_stats::{GaussianKde, Histogram, histogram_bins};
use tracing::warn;

const KDE_POINTS: usize = 200;

/// Histogram with a count-scaled KDE overlay for every series.
///
/// Every panel uses `floor(sqrt(rows))` bins, where `rows` is the table
/// height including rows the series is missing from.
pub fn histogram_figure(table: &SeriesTable, config: &PlotConfig) -> Result<Figure, PlotError> {
    let columns = table.column_names();
    config.histogram.ensure_fits(columns.len())?;
    let bins = histogram_bins(table.height());

    let mut panels_data = Vec::with_capacity(columns.len());
    for name in columns {
        let observed = table.observed(name)?;
        let hist = if observed.is_empty() {
            warn!(column = %name, "No observations to bin");
            None
        } else {
            Some(Histogram::new(&observed, bins)?)
        };
        let kde = match GaussianKde::new(&observed) {
            Ok(kde) => Some(kde),
            Err(err) => {
                warn!(column = %name, error = %err, "Skipping density overlay");
                None
            }
        };
        panels_data.push((name.as_str(), hist, kde));
    }

    let svg = render_svg(config.size(), |root| {
        let panels = root.split_evenly((config.histogram.rows, config.histogram.cols));

        for ((name, hist, kde), panel) in panels_data.iter().zip(&panels) {
            let (x_lo, x_hi, y_hi) = match hist {
                Some(h) => {
                    let lo = h.edges[0];
                    let hi = h.edges[h.edges.len() - 1];
                    (lo, hi, h.max_count().max(1) as f64 * 1.1)
                }
                None => (0.0, 1.0, 1.0),
            };
            let (x_lo, x_hi) = padded_range(&[x_lo, x_hi]);

            let mut chart = ChartBuilder::on(panel)
                .caption(*name, CAPTION_FONT)
                .margin(15)
                .x_label_area_size(50)
                .y_label_area_size(70)
                .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;
            chart
                .configure_mesh()
                .x_desc(*name)
                .y_desc("Frequency")
                .draw()?;

            let Some(hist) = hist else { continue };
            chart.draw_series(hist.edges.windows(2).zip(&hist.counts).map(|(edge, count)| {
                Rectangle::new(
                    [(edge[0], 0.0), (edge[1], *count as f64)],
                    SERIES_COLOR.mix(0.5).filled(),
                )
            }))?;

            if let Some(kde) = kde {
                let scale = hist.total() as f64 * hist.bin_width();
                let curve = kde
                    .curve(x_lo, x_hi, KDE_POINTS)
                    .into_iter()
                    .map(|(x, density)| (x, density * scale));
                chart.draw_series(LineSeries::new(curve, SERIES_COLOR.stroke_width(2)))?;
            }
        }
        Ok(())
    })?;

    Ok(Figure {
        name: "histograms".to_string(),
        svg,
    })
}
