// File: crates/cellplot-core/src/series.rs
// Summary: Series model: what to plot from a table column and how to stroke it.

use skia_safe as skia;

use crate::error::Result;
use crate::layout::ColumnLayout;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Which y axis a series is scaled against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisSide {
    #[default]
    Primary,
    Secondary,
}

pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// One requested line: a dependent column plus its label and stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSpec {
    pub column: usize,
    /// Legend text; empty means "not in legend".
    pub label: String,
    pub style: LineStyle,
    /// `None` takes the next theme palette color.
    pub color: Option<skia::Color>,
    pub width: f32,
    pub axis: AxisSide,
}

impl SeriesSpec {
    pub fn new(column: usize, label: impl Into<String>) -> Self {
        Self {
            column,
            label: label.into(),
            style: LineStyle::Solid,
            color: None,
            width: DEFAULT_LINE_WIDTH,
            axis: AxisSide::Primary,
        }
    }

    /// Series for a named field; the field name doubles as the label.
    pub fn field(layout: &ColumnLayout, name: &str) -> Result<Self> {
        Ok(Self::new(layout.column(name)?, name))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn dashed(self) -> Self { self.with_style(LineStyle::Dashed) }

    pub fn with_color(mut self, color: skia::Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width.max(0.1);
        self
    }

    pub fn on_secondary(mut self) -> Self {
        self.axis = AxisSide::Secondary;
        self
    }
}

/// A series after rendering: the full extracted column and the resolved stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct PlottedSeries {
    pub column: usize,
    pub label: String,
    pub values: Vec<f64>,
    pub style: LineStyle,
    pub color: skia::Color,
    pub width: f32,
    pub axis: AxisSide,
}
