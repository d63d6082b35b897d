// File: crates/cellplot-core/src/lib.rs
// Summary: Core library entry point; exports table loading, chart requests and rendering.

pub mod error;
pub mod table;
pub mod layout;
pub mod series;
pub mod request;
pub mod chart;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod text;
pub mod downsample;

pub use error::{PlotError, Result, RowFault};
pub use table::{load, load_with, parse_str, Table, TableFormat};
pub use layout::ColumnLayout;
pub use series::{AxisSide, LineStyle, PlottedSeries, SeriesSpec};
pub use request::{ChartRequest, Output};
pub use chart::{render, render_with, Chart, OutputFormat, RenderOptions, RenderedChart};
pub use axis::Axis;
pub use view::ViewState;
pub use theme::Theme;
pub use text::TextShaper;
pub use downsample::lttb;
