// File: crates/cellplot-core/src/chart.rs
// Summary: Series plotter: resolves a ChartRequest against a Table and draws it with Skia
// (CPU raster for PNG/RGBA, SVG canvas for vector output).

use std::path::Path;

use log::{debug, info};
use skia_safe as skia;

use crate::error::{PlotError, Result};
use crate::grid::{format_tick, nice_step, nice_ticks};
use crate::request::{ChartRequest, Output};
use crate::scale::LinearScale;
use crate::series::{AxisSide, LineStyle, PlottedSeries};
use crate::table::Table;
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::view::ViewState;
use crate::Axis;

const LABEL_SIZE: f32 = 14.0;
const TICK_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 16.0;
const TICK_LEN: f32 = 5.0;
const TICK_TARGET: usize = 8;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text on/off; snapshot tests turn it off to avoid font variance.
    pub draw_labels: bool,
    /// Fraction of the data span added above and below autoscaled y ranges.
    pub autoscale_margin: f64,
    /// Downsample (LTTB) longer series to this many points when stroking.
    pub max_points: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
            autoscale_margin: 0.02,
            max_points: None,
        }
    }
}

/// File format for chart output, picked from the path's extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(PlotError::UnsupportedFormat(ext)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Resolved chart: axes with final ranges and the series to stroke.
#[derive(Clone, Debug)]
pub struct Chart {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub y2_axis: Option<Axis>,
    pub title: Option<String>,
    pub legend: bool,
    pub x: Vec<f64>,
    pub series: Vec<PlottedSeries>,
}

/// Render `request` against `table` with default options.
pub fn render(table: &Table, request: &ChartRequest) -> Result<RenderedChart> {
    render_with(table, request, &RenderOptions::default())
}

pub fn render_with(table: &Table, request: &ChartRequest, opts: &RenderOptions) -> Result<RenderedChart> {
    request.validate(table)?;
    let x = table.column(request.x_index)?;
    let series = request
        .series
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            Ok(PlottedSeries {
                column: spec.column,
                label: spec.label.clone(),
                values: table.column(spec.column)?,
                style: spec.style,
                color: spec.color.unwrap_or_else(|| opts.theme.series_color(i)),
                width: spec.width,
                axis: spec.axis,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let view = ViewState::resolve(
        &x,
        &series,
        request.y_bounds,
        request.secondary_y_bounds,
        opts.autoscale_margin,
    );
    debug!(
        "chart {:?}: x {:?}, y {:?}, y2 {:?}, {} series",
        request.title.as_deref().unwrap_or(""),
        view.x_range(),
        view.y_range(),
        view.y2,
        series.len()
    );

    let chart = Chart {
        x_axis: Axis::new(request.x_label.clone(), view.x_min, view.x_max),
        y_axis: Axis::new(request.y_label.clone(), view.y_min, view.y_max),
        y2_axis: view.y2.map(|(lo, hi)| Axis::new(request.secondary_y_label.clone(), lo, hi)),
        title: request.title.clone(),
        legend: request.legend,
        x,
        series,
    };
    Ok(RenderedChart { chart, opts: opts.clone(), output: request.output.clone() })
}

/// One chart ready for disposal: written to a file, encoded in memory, or
/// handed to a display loop. Each value is independent; dropping it releases everything.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    chart: Chart,
    opts: RenderOptions,
    output: Output,
}

impl RenderedChart {
    pub fn chart(&self) -> &Chart { &self.chart }
    pub fn options(&self) -> &RenderOptions { &self.opts }
    pub fn output(&self) -> &Output { &self.output }
    pub fn title(&self) -> Option<&str> { self.chart.title.as_deref() }
    pub fn size(&self) -> (i32, i32) { (self.opts.width, self.opts.height) }

    pub fn x_range(&self) -> (f64, f64) { self.chart.x_axis.range() }
    pub fn y_range(&self) -> (f64, f64) { self.chart.y_axis.range() }
    pub fn secondary_y_range(&self) -> Option<(f64, f64)> { self.chart.y2_axis.as_ref().map(Axis::range) }
    pub fn x_values(&self) -> &[f64] { &self.chart.x }
    pub fn series(&self) -> &[PlottedSeries] { &self.chart.series }

    /// Replace the output disposition (e.g. to redirect a display chart to a file).
    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Change the surface size, e.g. to follow a resized window.
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.opts.width = width.max(1);
        self.opts.height = height.max(1);
    }

    /// Draw onto any Skia canvas sized `size()`.
    pub fn draw(&self, canvas: &skia::Canvas) {
        self.chart.draw(canvas, &self.opts);
    }

    /// Render to a PNG byte buffer using a CPU raster surface.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((self.opts.width, self.opts.height))
            .ok_or(PlotError::Surface("raster"))?;
        self.draw(surface.canvas());

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(PlotError::Encode("png"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to tightly packed RGBA8 pixels: `(pixels, width, height, stride)`.
    pub fn to_rgba8(&self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = (self.opts.width.max(1), self.opts.height.max(1));
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Premul, None);
        let mut surface = skia::surfaces::raster(&info, None, None).ok_or(PlotError::Surface("rgba"))?;
        self.draw(surface.canvas());

        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            return Err(PlotError::Encode("rgba"));
        }
        Ok((px, w as u32, h as u32, stride))
    }

    /// Render to an SVG document.
    pub fn to_svg_bytes(&self) -> Vec<u8> {
        let bounds = skia::Rect::from_wh(self.opts.width as f32, self.opts.height as f32);
        let canvas = skia::svg::Canvas::new(bounds, None);
        self.draw(&canvas);
        canvas.end().as_bytes().to_vec()
    }

    /// Write to `path`; the extension selects PNG or SVG. Parent directories are created.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = match OutputFormat::from_path(path)? {
            OutputFormat::Png => self.to_png_bytes()?,
            OutputFormat::Svg => self.to_svg_bytes(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

// ---- drawing ----------------------------------------------------------------

struct Frame {
    plot: skia::Rect,
    sx: LinearScale,
    sy: LinearScale,
    sy2: Option<LinearScale>,
}

impl Chart {
    fn frame(&self, opts: &RenderOptions) -> Frame {
        let mut insets = opts.insets;
        if self.y2_axis.is_some() {
            insets.right = insets.right.max(insets.left);
        }
        let r = insets.plot_rect(opts.width, opts.height);
        let plot = r.to_skia();
        let sx = LinearScale::horizontal(plot.left, plot.right, self.x_axis.min, self.x_axis.max);
        let sy = LinearScale::vertical(plot.top, plot.bottom, self.y_axis.min, self.y_axis.max);
        let sy2 = self
            .y2_axis
            .as_ref()
            .map(|a| LinearScale::vertical(plot.top, plot.bottom, a.min, a.max));
        Frame { plot, sx, sy, sy2 }
    }

    pub fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        let f = self.frame(opts);
        canvas.clear(theme.background);

        let x_ticks = nice_ticks(self.x_axis.min, self.x_axis.max, TICK_TARGET);
        let y_ticks = nice_ticks(self.y_axis.min, self.y_axis.max, TICK_TARGET);
        draw_grid(canvas, &f, &x_ticks, &y_ticks, theme);

        canvas.save();
        canvas.clip_rect(f.plot, None, true);
        for s in &self.series {
            let sy = match (s.axis, f.sy2) {
                (AxisSide::Secondary, Some(sy2)) => sy2,
                _ => f.sy,
            };
            draw_line_series(canvas, &f.sx, &sy, &self.x, s, opts.max_points);
        }
        canvas.restore();

        draw_frame(canvas, &f, &x_ticks, &y_ticks, theme);
        if let (Some(a), Some(sy2)) = (&self.y2_axis, f.sy2) {
            draw_right_ticks(canvas, f.plot, &sy2, &nice_ticks(a.min, a.max, TICK_TARGET), theme);
        }

        if opts.draw_labels {
            let shaper = TextShaper::new();
            self.draw_labels(canvas, &f, &shaper, &x_ticks, &y_ticks, theme);
            if self.legend {
                draw_legend(canvas, f.plot, &self.series, &shaper, theme);
            }
        }
    }

    fn draw_labels(
        &self,
        canvas: &skia::Canvas,
        f: &Frame,
        shaper: &TextShaper,
        x_ticks: &[f64],
        y_ticks: &[f64],
        theme: &Theme,
    ) {
        let p = f.plot;
        let x_step = nice_step(self.x_axis.span(), TICK_TARGET);
        for &v in x_ticks {
            let x = f.sx.to_px(v);
            shaper.draw_centered(canvas, &format_tick(v, x_step), x, p.bottom + TICK_LEN + TICK_SIZE + 4.0, TICK_SIZE, theme.tick, true);
        }
        let y_step = nice_step(self.y_axis.span(), TICK_TARGET);
        for &v in y_ticks {
            let y = f.sy.to_px(v);
            shaper.draw_right(canvas, &format_tick(v, y_step), p.left - TICK_LEN - 4.0, y + TICK_SIZE * 0.35, TICK_SIZE, theme.tick, true);
        }
        if let (Some(a), Some(sy2)) = (&self.y2_axis, f.sy2) {
            let step = nice_step(a.span(), TICK_TARGET);
            for v in nice_ticks(a.min, a.max, TICK_TARGET) {
                let y = sy2.to_px(v);
                shaper.draw_left(canvas, &format_tick(v, step), p.right + TICK_LEN + 4.0, y + TICK_SIZE * 0.35, TICK_SIZE, theme.tick, true);
            }
            if !a.label.is_empty() {
                let x = p.right + TICK_LEN + 4.0 + 48.0 + LABEL_SIZE;
                shaper.draw_vertical(canvas, &a.label, x, (p.top + p.bottom) * 0.5, LABEL_SIZE, theme.axis_label);
            }
        }

        if !self.x_axis.label.is_empty() {
            shaper.draw_centered(canvas, &self.x_axis.label, (p.left + p.right) * 0.5, p.bottom + 52.0, LABEL_SIZE, theme.axis_label, false);
        }
        if !self.y_axis.label.is_empty() {
            let x = (p.left - 70.0).max(2.0);
            shaper.draw_vertical(canvas, &self.y_axis.label, x, (p.top + p.bottom) * 0.5, LABEL_SIZE, theme.axis_label);
        }
        if let Some(title) = &self.title {
            shaper.draw_centered(canvas, title, (p.left + p.right) * 0.5, p.top - 16.0, TITLE_SIZE, theme.axis_label, false);
        }
    }
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn draw_grid(canvas: &skia::Canvas, f: &Frame, x_ticks: &[f64], y_ticks: &[f64], theme: &Theme) {
    let paint = stroke_paint(theme.grid, 1.0);
    let p = f.plot;
    for &v in x_ticks {
        let x = f.sx.to_px(v);
        canvas.draw_line((x, p.top), (x, p.bottom), &paint);
    }
    for &v in y_ticks {
        let y = f.sy.to_px(v);
        canvas.draw_line((p.left, y), (p.right, y), &paint);
    }
}

fn draw_frame(canvas: &skia::Canvas, f: &Frame, x_ticks: &[f64], y_ticks: &[f64], theme: &Theme) {
    let p = f.plot;
    canvas.draw_rect(p, &stroke_paint(theme.axis_line, 1.5));

    let tick = stroke_paint(theme.axis_line, 1.0);
    for &v in x_ticks {
        let x = f.sx.to_px(v);
        canvas.draw_line((x, p.bottom), (x, p.bottom + TICK_LEN), &tick);
    }
    for &v in y_ticks {
        let y = f.sy.to_px(v);
        canvas.draw_line((p.left - TICK_LEN, y), (p.left, y), &tick);
    }
}

fn draw_right_ticks(canvas: &skia::Canvas, p: skia::Rect, sy2: &LinearScale, ticks: &[f64], theme: &Theme) {
    let tick = stroke_paint(theme.axis_line, 1.0);
    for &v in ticks {
        let y = sy2.to_px(v);
        canvas.draw_line((p.right, y), (p.right + TICK_LEN, y), &tick);
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    sx: &LinearScale,
    sy: &LinearScale,
    x: &[f64],
    series: &PlottedSeries,
    max_points: Option<usize>,
) {
    let mut data: Vec<(f64, f64)> = x.iter().copied().zip(series.values.iter().copied()).collect();
    if let Some(max) = max_points {
        if data.len() > max && max >= 2 {
            data = crate::downsample::lttb(&data, max);
        }
    }
    if data.is_empty() {
        return;
    }

    // Non-finite samples break the line instead of poisoning the path.
    let mut path = skia::Path::new();
    let mut pen_down = false;
    for &(x, y) in &data {
        if !x.is_finite() || !y.is_finite() {
            pen_down = false;
            continue;
        }
        let pt = (sx.to_px(x), sy.to_px(y));
        if pen_down {
            path.line_to(pt);
        } else {
            path.move_to(pt);
            pen_down = true;
        }
    }

    let mut stroke = stroke_paint(series.color, series.width);
    stroke.set_stroke_join(skia::paint::Join::Round);
    if series.style == LineStyle::Dashed {
        let on = (series.width * 3.0).max(4.0);
        let off = (series.width * 2.0).max(3.0);
        stroke.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
    }
    canvas.draw_path(&path, &stroke);
}

fn draw_legend(canvas: &skia::Canvas, p: skia::Rect, series: &[PlottedSeries], shaper: &TextShaper, theme: &Theme) {
    let entries: Vec<&PlottedSeries> = series.iter().filter(|s| !s.label.is_empty()).collect();
    if entries.is_empty() {
        return;
    }
    let row_h = LABEL_SIZE + 6.0;
    let swatch = 28.0;
    let pad = 8.0;
    let text_w = entries
        .iter()
        .map(|s| shaper.measure_width(&s.label, LABEL_SIZE, false))
        .fold(0.0f32, f32::max);
    let w = pad * 3.0 + swatch + text_w;
    let h = pad * 2.0 + row_h * entries.len() as f32;
    let bx = skia::Rect::from_xywh(p.right - w - 10.0, p.top + 10.0, w, h);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_color(theme.legend_background);
    canvas.draw_rect(bx, &fill);
    canvas.draw_rect(bx, &stroke_paint(theme.grid, 1.0));

    for (i, s) in entries.iter().enumerate() {
        let cy = bx.top + pad + row_h * (i as f32 + 0.5);
        let mut line = stroke_paint(s.color, s.width);
        if s.style == LineStyle::Dashed {
            line.set_path_effect(skia::PathEffect::dash(&[6.0, 4.0], 0.0));
        }
        canvas.draw_line((bx.left + pad, cy), (bx.left + pad + swatch, cy), &line);
        shaper.draw_left(canvas, &s.label, bx.left + pad * 2.0 + swatch, cy + LABEL_SIZE * 0.35, LABEL_SIZE, theme.axis_label, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesSpec;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("potential.SVG")).unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("a/b.png")).unwrap(), OutputFormat::Png);
        assert!(matches!(
            OutputFormat::from_path(Path::new("gates.eps")),
            Err(PlotError::UnsupportedFormat(e)) if e == "eps"
        ));
        assert!(matches!(OutputFormat::from_path(Path::new("noext")), Err(PlotError::UnsupportedFormat(_))));
    }

    #[test]
    fn palette_assigned_in_series_order() {
        let t = Table::from_rows(vec![vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]]).unwrap();
        let red = skia::Color::from_argb(255, 255, 0, 0);
        let req = ChartRequest::new(0)
            .series(SeriesSpec::new(1, "a"))
            .series(SeriesSpec::new(2, "b").with_color(red));
        let opts = RenderOptions::default();
        let c = render_with(&t, &req, &opts).unwrap();
        assert_eq!(c.series()[0].color, opts.theme.series_color(0));
        assert_eq!(c.series()[1].color, red);
    }

    #[test]
    fn output_is_carried_through() {
        let t = Table::from_rows(vec![vec![0.0, 1.0], vec![1.0, 2.0]]).unwrap();
        let req = ChartRequest::new(0).to_file("out/v.svg");
        let c = render(&t, &req).unwrap();
        assert_eq!(c.output(), &Output::File(PathBuf::from("out/v.svg")));
        let c = c.with_output(Output::Display);
        assert_eq!(c.output(), &Output::Display);
    }
}
