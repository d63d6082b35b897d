// File: crates/cellplot-core/src/request.rs
// Summary: ChartRequest describing one chart: x column, series, bounds, labels, output.

use std::path::PathBuf;

use crate::error::{PlotError, Result};
use crate::layout::ColumnLayout;
use crate::series::{AxisSide, SeriesSpec};
use crate::table::Table;

/// Where a rendered chart should end up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Output {
    /// Hand off to an interactive window.
    #[default]
    Display,
    /// Write to a file; the extension picks the format (`png`, `svg`).
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartRequest {
    pub x_index: usize,
    pub series: Vec<SeriesSpec>,
    /// Fixed `(low, high)` for the primary y axis; autoscaled when `None`.
    pub y_bounds: Option<(f64, f64)>,
    pub secondary_y_bounds: Option<(f64, f64)>,
    pub x_label: String,
    pub y_label: String,
    pub secondary_y_label: String,
    pub title: Option<String>,
    pub legend: bool,
    pub output: Output,
}

impl ChartRequest {
    pub fn new(x_index: usize) -> Self {
        Self {
            x_index,
            series: Vec::new(),
            y_bounds: None,
            secondary_y_bounds: None,
            x_label: String::new(),
            y_label: String::new(),
            secondary_y_label: String::new(),
            title: None,
            legend: false,
            output: Output::Display,
        }
    }

    /// Request with the named field as independent variable.
    pub fn over_field(layout: &ColumnLayout, name: &str) -> Result<Self> {
        Ok(Self::new(layout.column(name)?))
    }

    pub fn series(mut self, spec: SeriesSpec) -> Self {
        self.series.push(spec);
        self
    }

    /// Add one series per named field, labelled by field name.
    pub fn fields(mut self, layout: &ColumnLayout, names: &[&str]) -> Result<Self> {
        for name in names {
            self.series.push(SeriesSpec::field(layout, name)?);
        }
        Ok(self)
    }

    pub fn with_y_bounds(mut self, low: f64, high: f64) -> Self {
        self.y_bounds = Some((low, high));
        self
    }

    pub fn with_secondary_y_bounds(mut self, low: f64, high: f64) -> Self {
        self.secondary_y_bounds = Some((low, high));
        self
    }

    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn with_secondary_label(mut self, label: impl Into<String>) -> Self {
        self.secondary_y_label = label.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn to_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Output::File(path.into());
        self
    }

    pub fn has_secondary(&self) -> bool {
        self.series.iter().any(|s| s.axis == AxisSide::Secondary)
    }

    /// Check every column against `table`. Range errors are reported before
    /// the independent/dependent overlap.
    pub fn validate(&self, table: &Table) -> Result<()> {
        table.check_column(self.x_index)?;
        for s in &self.series {
            table.check_column(s.column)?;
        }
        if let Some(s) = self.series.iter().find(|s| s.column == self.x_index) {
            return Err(PlotError::DependentIsIndependent(s.column));
        }
        Ok(())
    }
}
