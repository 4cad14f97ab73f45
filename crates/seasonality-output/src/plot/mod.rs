//! Exploratory figures for a cleaned series table.
//!
//! Six figures are rendered, always in this order:
//!
//! | # | name                  | content                                   |
//! |---|-----------------------|-------------------------------------------|
//! | 1 | `time_series`         | stacked line plots sharing the date axis  |
//! | 2 | `histograms`          | histogram + Gaussian KDE per series       |
//! | 3 | `acf`                 | autocorrelation stems with Bartlett band  |
//! | 4 | `pacf`                | partial autocorrelation stems             |
//! | 5 | `scatter_matrix`      | pairwise scatter, KDE on the diagonal     |
//! | 6 | `correlation_heatmap` | Pearson coefficients, cool-warm palette   |
//!
//! Each figure is an SVG document handed to a [`FigureSink`].

mod correlogram;
mod heatmap;
mod histogram;
mod palette;
mod scatter;
mod sink;
mod time_series;

pub use correlogram::{acf_figure, pacf_figure};
pub use heatmap::{correlation_annotations, correlation_heatmap};
pub use histogram::histogram_figure;
pub use palette::coolwarm;
pub use scatter::scatter_matrix;
pub use sink::{FigureSink, MemorySink, SvgDirectorySink};
pub use time_series::{TIME_SERIES_TITLE, time_series_figure};

use crate::error::PlotError;
use plotters::coord::Shift;
use plotters::prelude::*;
use seasonality_data::SeriesTable;
use seasonality_stats::LagWindowConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A rendered figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    /// Short snake-case name, used for file names.
    pub name: String,

    /// SVG document.
    pub svg: String,
}

/// Subplot grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl GridLayout {
    /// Create a grid layout.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of panels in the grid.
    pub const fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Fail unless the grid holds at least `needed` panels.
    pub fn ensure_fits(&self, needed: usize) -> Result<(), PlotError> {
        if self.capacity() < needed {
            return Err(PlotError::GridTooSmall {
                rows: self.rows,
                cols: self.cols,
                needed,
            });
        }
        Ok(())
    }
}

/// Rendering options shared by every figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    /// Grid for the stacked time-series panel
    pub time_series: GridLayout,
    /// Grid for the histograms
    pub histogram: GridLayout,
    /// Grid for the ACF plots
    pub acf: GridLayout,
    /// Grid for the PACF plots
    pub pacf: GridLayout,
    /// Lag window for the correlograms
    pub lag_window: LagWindowConfig,
    /// Confidence level of the correlogram bands
    pub confidence_level: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            time_series: GridLayout::new(6, 1),
            histogram: GridLayout::new(3, 2),
            acf: GridLayout::new(3, 2),
            pacf: GridLayout::new(3, 2),
            lag_window: LagWindowConfig::default(),
            confidence_level: 0.95,
        }
    }
}

impl PlotConfig {
    const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Render all six figures in order and present each to `sink`.
pub fn render_figures(
    table: &SeriesTable,
    config: &PlotConfig,
    sink: &mut dyn FigureSink,
) -> Result<(), PlotError> {
    info!(
        rows = table.height(),
        series = table.column_names().len(),
        "Rendering figures"
    );

    type Render = fn(&SeriesTable, &PlotConfig) -> Result<Figure, PlotError>;
    let renderers: [Render; 6] = [
        time_series_figure,
        histogram_figure,
        acf_figure,
        pacf_figure,
        scatter_matrix,
        correlation_heatmap,
    ];

    for render in renderers {
        let figure = render(table, config)?;
        debug!(figure = %figure.name, bytes = figure.svg.len(), "Rendered figure");
        sink.present(&figure)?;
    }
    Ok(())
}

/// Draw onto a fresh white SVG canvas and return the document.
pub(crate) fn render_svg<F>(size: (u32, u32), draw: F) -> Result<String, PlotError>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<(), PlotError>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    Ok(svg)
}

/// Axis range covering `values` with 5% padding on each side.
///
/// Empty input gives `0..1`; a single distinct value is widened by 0.5.
pub(crate) fn padded_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Series color used across figures.
pub(crate) const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Panel caption font.
pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_fits() {
        let grid = GridLayout::new(3, 2);
        assert_eq!(grid.capacity(), 6);
        assert!(grid.ensure_fits(6).is_ok());
        assert!(matches!(
            grid.ensure_fits(7),
            Err(PlotError::GridTooSmall {
                rows: 3,
                cols: 2,
                needed: 7
            })
        ));
    }

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range(&[0.0, 10.0, f64::NAN]);
        assert_relative_eq!(lo, -0.5);
        assert_relative_eq!(hi, 10.5);
        assert_eq!(padded_range(&[]), (0.0, 1.0));
        assert_eq!(padded_range(&[2.0, 2.0]), (1.5, 2.5));
    }

    #[test]
    fn test_default_config() {
        let config = PlotConfig::default();
        assert_eq!(config.size(), (2000, 2000));
        assert_eq!(config.time_series, GridLayout::new(6, 1));
        assert_eq!(config.acf, GridLayout::new(3, 2));
        assert_eq!(config.confidence_level, 0.95);
    }

    #[test]
    fn test_render_svg_produces_document() {
        let svg = render_svg((100, 80), |_| Ok(())).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }
}
