//! Cool-warm diverging palette and the data-scaled color range of the heatmap.
//!
//! Like seaborn's default heatmap the color range spans the smallest and
//! largest finite coefficient rather than a fixed `[-1, 1]`.

use plotters::style::RGBColor;

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Color for undefined coefficients.
pub(crate) const MISSING: RGBColor = RGBColor(240, 240, 240);

/// Diverging cool-warm color for a value in `[-1, 1]`.
///
/// Values outside the range are clamped; `NaN` maps to a light gray.
pub fn coolwarm(value: f64) -> RGBColor {
    if value.is_nan() {
        return MISSING;
    }
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (COOL, NEUTRAL, v + 1.0)
    } else {
        (NEUTRAL, WARM, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(
        lerp(from.0, to.0),
        lerp(from.1, to.1),
        lerp(from.2, to.2),
    )
}

/// Linear map from a data range onto the cool-warm palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Range over the finite `values`; `[-1, 1]` when there are none.
    ///
    /// A single distinct value is widened by 0.5 on each side.
    pub(crate) fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() {
            return Self { min: -1.0, max: 1.0 };
        }
        if min == max {
            return Self {
                min: min - 0.5,
                max: max + 0.5,
            };
        }
        Self { min, max }
    }

    /// Lower and upper ends of the range.
    pub(crate) const fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Position of `value` on the palette, in `[-1, 1]`.
    pub(crate) fn position(&self, value: f64) -> f64 {
        2.0 * (value - self.min) / (self.max - self.min) - 1.0
    }

    /// Palette color of `value`.
    pub(crate) fn color(&self, value: f64) -> RGBColor {
        coolwarm(self.position(value))
    }
}
