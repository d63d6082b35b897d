// File: crates/cellplot-core/src/view.rs
// Summary: Resolved view ranges for a chart: x from the first/last sample, y fixed or autoscaled.

use crate::series::{AxisSide, PlottedSeries};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Secondary y range, present when any series is on the secondary axis.
    pub y2: Option<(f64, f64)>,
}

impl ViewState {
    /// `x` is the independent column. The x range is `(x[0], x[last])`:
    /// samples are assumed to increase monotonically and are not re-sorted.
    pub fn resolve(
        x: &[f64],
        series: &[PlottedSeries],
        y_bounds: Option<(f64, f64)>,
        y2_bounds: Option<(f64, f64)>,
        margin: f64,
    ) -> Self {
        let (x_min, x_max) = first_last(x);
        let on = |side: AxisSide| series.iter().filter(move |s| s.axis == side).map(|s| s.values.as_slice());
        let (y_min, y_max) = y_bounds.unwrap_or_else(|| autoscale(on(AxisSide::Primary), margin));
        let y2 = if series.iter().any(|s| s.axis == AxisSide::Secondary) {
            Some(y2_bounds.unwrap_or_else(|| autoscale(on(AxisSide::Secondary), margin)))
        } else {
            None
        };
        Self { x_min, x_max, y_min, y_max, y2 }
    }

    pub fn x_range(&self) -> (f64, f64) { (self.x_min, self.x_max) }
    pub fn y_range(&self) -> (f64, f64) { (self.y_min, self.y_max) }
}

/// Literal first and last values; `(0, 1)` for an empty slice.
pub fn first_last(x: &[f64]) -> (f64, f64) {
    match (x.first(), x.last()) {
        (Some(&a), Some(&b)) => (a, b),
        _ => (0.0, 1.0),
    }
}

/// Min/max over the finite values of all columns, padded by `margin` x span.
/// A flat range widens to `[v, v + 1]`; no finite data gives `(0, 1)`.
/// The padded range is clamped to finite `f64` values.
pub fn autoscale<'a>(columns: impl Iterator<Item = &'a [f64]>, margin: f64) -> (f64, f64) {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for col in columns {
        for &y in col.iter().filter(|y| y.is_finite()) {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return (0.0, 1.0);
    }
    if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
    if margin.is_nan() || margin <= 0.0 {
        return (y_min, y_max);
    }
    // halves keep the span finite for data near +-f64::MAX
    let m = (y_max * 0.5 - y_min * 0.5) * (2.0 * margin);
    ((y_min - m).max(f64::MIN), (y_max + m).min(f64::MAX))
}
