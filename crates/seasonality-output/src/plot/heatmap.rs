use super::palette::ColorScale;
use super::{CAPTION_FONT, Figure, PlotConfig, render_svg};
use crate::error::PlotError;
use ndarray::Array2;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use seasonality_data::SeriesTable;
use seasonality_stats::correlation_matrix;

const COLORBAR_STEPS: usize = 100;

/// Cell annotations: each coefficient to two decimals, row-major.
pub fn correlation_annotations(corr: &Array2<f64>) -> Vec<Vec<String>> {
    corr.rows()
        .into_iter()
        .map(|row| row.iter().map(|v| format!("{v:.2}")).collect())
        .collect()
}

/// Pearson correlation heatmap with annotated cells and a color bar.
///
/// Colors span the smallest to the largest coefficient in the matrix.
pub fn correlation_heatmap(table: &SeriesTable, config: &PlotConfig) -> Result<Figure, PlotError> {
    let columns = table.column_names();
    let k = columns.len();
    let corr = correlation_matrix(&table.to_matrix()?)?;
    let labels = correlation_annotations(&corr);
    let scale = ColorScale::from_values(corr.iter().copied());

    let svg = render_svg(config.size(), |root| {
        if k == 0 {
            return Ok(());
        }
        let (main, bar) = root.split_horizontally(config.width * 88 / 100);
        let extent = k as f64;
        let corr = &corr;

        let mut chart = ChartBuilder::on(&main)
            .margin(20)
            .x_label_area_size(140)
            .y_label_area_size(180)
            .build_cartesian_2d(0.0..extent, 0.0..extent)?;

        // Row 0 at the top.
        chart.draw_series((0..k).flat_map(|i| {
            let y = (k - 1 - i) as f64;
            (0..k).map(move |j| {
                let x = j as f64;
                Rectangle::new([(x, y), (x + 1.0, y + 1.0)], scale.color(corr[[i, j]]).filled())
            })
        }))?;

        let dark = ("sans-serif", 22)
            .into_font()
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let light = ("sans-serif", 22)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (i, row) in labels.iter().enumerate() {
            let y = (k - 1 - i) as f64 + 0.5;
            for (j, label) in row.iter().enumerate() {
                let style = if scale.position(corr[[i, j]]).abs() > 0.6 {
                    &dark
                } else {
                    &light
                };
                chart.draw_series(std::iter::once(Text::new(
                    label.clone(),
                    (j as f64 + 0.5, y),
                    style.clone(),
                )))?;
            }
        }

        // Tick labels are placed in pixel space under and left of the cells.
        let x_style = CAPTION_FONT
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        let y_style = CAPTION_FONT
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for (idx, name) in columns.iter().enumerate() {
            let (px, py) = chart.backend_coord(&(idx as f64 + 0.5, 0.0));
            root.draw(&Text::new(name.as_str(), (px, py + 10), x_style.clone()))?;

            let (px, py) = chart.backend_coord(&(0.0, (k - 1 - idx) as f64 + 0.5));
            root.draw(&Text::new(name.as_str(), (px - 10, py), y_style.clone()))?;
        }

        draw_colorbar(&bar, &scale)?;
        Ok(())
    })?;

    Ok(Figure {
        name: "correlation_heatmap".to_string(),
        svg,
    })
}

fn draw_colorbar(
    area: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    scale: &ColorScale,
) -> Result<(), PlotError> {
    let (min, max) = scale.bounds();
    let mut chart = ChartBuilder::on(area)
        .margin_top(160)
        .margin_bottom(160)
        .margin_right(20)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, min..max)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(9)
        .draw()?;

    let step = (max - min) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = min + step * i as f64;
        Rectangle::new(
            [(0.0, lo), (1.0, lo + step)],
            scale.color(lo + step / 2.0).filled(),
        )
    }))?;
    Ok(())
}
