// File: crates/cellplot/src/main.rs
// Summary: CLI: loads a simulator output table and renders its charts to files or a window.

mod charts;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use cellplot_core::{
    load_with, render_with, theme, ChartRequest, ColumnLayout, LineStyle, Output, OutputFormat,
    RenderOptions, SeriesSpec, TableFormat,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use charts::NamedRequest;

#[derive(Parser)]
#[command(name = "cellplot", version, about = "Plot cardiac cell simulator output tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Input table; each subcommand has its own default file name.
    #[arg(long, short, global = true)]
    input: Option<PathBuf>,

    /// Write charts into this directory instead of opening a window.
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// File format used with --out-dir.
    #[arg(long, value_enum, default_value_t = FormatArg::Svg, global = true)]
    format: FormatArg,

    /// Color theme (light, dark, solarized-light, solarized-dark, high-contrast-dark).
    #[arg(long, default_value = "light", global = true)]
    theme: String,

    /// Downsample series longer than this many points when drawing.
    #[arg(long, global = true)]
    max_points: Option<usize>,

    /// Chart size in pixels, WIDTHxHEIGHT.
    #[arg(long, default_value = "800x800", global = true)]
    size: String,
}

#[derive(Subcommand)]
enum Command {
    /// Potential, ionic current and gate variables of an integration run (bernus.txt).
    Integrate,
    /// Potential with ionic current overlaid, then gate variables (bernus.txt).
    Probe,
    /// Membrane currents over time (out.txt).
    Currents,
    /// Gating steady states and time constants versus potential (bernus_functions.txt).
    Functions,
    /// Any columns of any table.
    Plot(PlotArgs),
}

#[derive(clap::Args)]
struct PlotArgs {
    /// Independent-variable column.
    #[arg(long, default_value_t = 0)]
    x: usize,

    /// Series as COLUMN[:LABEL[:dashed]]; repeatable.
    #[arg(long = "series", short = 's')]
    series: Vec<SeriesArg>,

    /// Series drawn against a second y axis, same syntax as --series.
    #[arg(long = "secondary")]
    secondary: Vec<SeriesArg>,

    #[arg(long, allow_hyphen_values = true, requires = "y_max")]
    y_min: Option<f64>,

    #[arg(long, allow_hyphen_values = true, requires = "y_min")]
    y_max: Option<f64>,

    #[arg(long, default_value = "")]
    x_label: String,

    #[arg(long, default_value = "")]
    y_label: String,

    #[arg(long, default_value = "")]
    y2_label: String,

    #[arg(long)]
    title: Option<String>,

    /// Show a legend of the labelled series.
    #[arg(long)]
    legend: bool,

    /// Input is comma-separated instead of whitespace-separated.
    #[arg(long)]
    csv: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SeriesArg {
    column: usize,
    label: Option<String>,
    style: LineStyle,
}

impl FromStr for SeriesArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let column = parts
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("'{s}': expected COLUMN[:LABEL[:dashed]]"))?;
        let label = parts.next().map(str::to_string);
        let style = match parts.next().map(str::trim) {
            None | Some("") | Some("solid") => LineStyle::Solid,
            Some("dashed") => LineStyle::Dashed,
            Some(other) => return Err(format!("'{s}': unknown line style '{other}'")),
        };
        Ok(Self { column, label, style })
    }
}

impl SeriesArg {
    fn spec(&self) -> SeriesSpec {
        let label = self.label.clone().unwrap_or_else(|| format!("column {}", self.column));
        SeriesSpec::new(self.column, label).with_style(self.style)
    }
}

fn parse_size(s: &str) -> Result<(i32, i32)> {
    let (w, h) = s.split_once(['x', 'X']).with_context(|| format!("size '{s}' is not WIDTHxHEIGHT"))?;
    let w: i32 = w.trim().parse().with_context(|| format!("bad width in '{s}'"))?;
    let h: i32 = h.trim().parse().with_context(|| format!("bad height in '{s}'"))?;
    if w < 64 || h < 64 {
        bail!("size '{s}' is too small (minimum 64x64)");
    }
    Ok((w, h))
}

impl Cli {
    fn render_options(&self) -> Result<RenderOptions> {
        let theme = theme::find(&self.theme).with_context(|| format!("unknown theme '{}'", self.theme))?;
        let (width, height) = parse_size(&self.size)?;
        Ok(RenderOptions { width, height, theme, max_points: self.max_points, ..RenderOptions::default() })
    }
}

/// Input path, table format, expected layout (if fixed) and the charts to draw.
struct Plan {
    input: PathBuf,
    format: TableFormat,
    layout: Option<ColumnLayout>,
    requests: Vec<NamedRequest>,
}

fn plan(cli: &Cli) -> Result<Plan> {
    let script = |default: &str, fields: &[&str], build: fn(&ColumnLayout) -> cellplot_core::Result<Vec<NamedRequest>>| -> Result<Plan> {
        let layout = ColumnLayout::new(fields.iter().copied())?;
        let requests = build(&layout)?;
        Ok(Plan {
            input: cli.input.clone().unwrap_or_else(|| PathBuf::from(default)),
            format: TableFormat::Whitespace,
            layout: Some(layout),
            requests,
        })
    };
    match &cli.command {
        Command::Integrate => script("bernus.txt", &charts::STATE_FIELDS[..], charts::integrate),
        Command::Probe => script("bernus.txt", &charts::STATE_FIELDS[..], charts::probe),
        Command::Currents => script("out.txt", &charts::CURRENT_FIELDS[..], charts::currents),
        Command::Functions => script("bernus_functions.txt", &charts::FUNCTION_FIELDS[..], charts::functions),
        Command::Plot(args) => {
            let Some(input) = cli.input.clone() else {
                bail!("plot needs --input");
            };
            let mut req = ChartRequest::new(args.x)
                .with_labels(args.x_label.clone(), args.y_label.clone())
                .with_secondary_label(args.y2_label.clone())
                .with_legend(args.legend);
            for s in &args.series {
                req = req.series(s.spec());
            }
            for s in &args.secondary {
                req = req.series(s.spec().on_secondary());
            }
            if let (Some(lo), Some(hi)) = (args.y_min, args.y_max) {
                req = req.with_y_bounds(lo, hi);
            }
            if let Some(title) = &args.title {
                req = req.with_title(title.clone());
            }
            let format = if args.csv { TableFormat::Csv } else { TableFormat::Whitespace };
            Ok(Plan { input, format, layout: None, requests: vec![NamedRequest { name: "plot", request: req }] })
        }
    }
}

fn output_path(dir: &Path, name: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{name}.{}", format.extension()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let opts = cli.render_options()?;
    let plan = plan(&cli)?;

    let table = load_with(&plan.input, plan.format)
        .with_context(|| format!("failed to load table '{}'", plan.input.display()))?;
    info!(
        "loaded {}: {} rows x {} columns",
        plan.input.display(),
        table.row_count(),
        table.column_count()
    );
    if let Some(layout) = &plan.layout {
        layout
            .check(&table)
            .with_context(|| format!("'{}' does not match the expected columns", plan.input.display()))?;
    }

    let format = OutputFormat::from(cli.format);
    let mut on_screen = Vec::new();
    for NamedRequest { name, mut request } in plan.requests {
        if let Some(dir) = &cli.out_dir {
            request = request.to_file(output_path(dir, name, format));
        }
        let chart = render_with(&table, &request, &opts).with_context(|| format!("failed to render '{name}'"))?;
        match chart.output() {
            Output::File(path) => chart.write_to(path)?,
            Output::Display => {
                info!("queued '{name}' for display");
                on_screen.push(chart);
            }
        }
    }

    cellplot_window::show(on_screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_arg_forms() {
        assert_eq!(
            "3".parse::<SeriesArg>().unwrap(),
            SeriesArg { column: 3, label: None, style: LineStyle::Solid }
        );
        assert_eq!(
            "7:Iion:dashed".parse::<SeriesArg>().unwrap(),
            SeriesArg { column: 7, label: Some("Iion".into()), style: LineStyle::Dashed }
        );
        assert!("x:V".parse::<SeriesArg>().is_err());
        assert!("1:V:dotted".parse::<SeriesArg>().is_err());
    }

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size("800x600").unwrap(), (800, 600));
        assert!(parse_size("800").is_err());
        assert!(parse_size("10x10").is_err());
    }

    #[test]
    fn plot_subcommand_builds_request() {
        let cli = Cli::try_parse_from([
            "cellplot", "plot", "--input", "bernus.txt", "-s", "1:V", "--secondary", "7:Iion:dashed",
            "--y-min", "-100", "--y-max", "60",
        ])
        .unwrap();
        let plan = plan(&cli).unwrap();
        let req = &plan.requests[0].request;
        assert_eq!(req.y_bounds, Some((-100.0, 60.0)));
        assert_eq!(req.series.len(), 2);
        assert!(req.has_secondary());
        assert!(plan.layout.is_none());
    }

    #[test]
    fn script_defaults_and_overrides() {
        let cli = Cli::try_parse_from(["cellplot", "functions"]).unwrap();
        assert_eq!(plan(&cli).unwrap().input, PathBuf::from("bernus_functions.txt"));
        let cli = Cli::try_parse_from(["cellplot", "currents", "--input", "run2.txt"]).unwrap();
        assert_eq!(plan(&cli).unwrap().input, PathBuf::from("run2.txt"));
    }

    #[test]
    fn out_dir_names_files_by_chart() {
        assert_eq!(output_path(Path::new("figs"), "gates", OutputFormat::Svg), PathBuf::from("figs/gates.svg"));
    }

    #[test]
    fn unknown_theme_rejected() {
        let cli = Cli::try_parse_from(["cellplot", "probe", "--theme", "neon"]).unwrap();
        assert!(cli.render_options().is_err());
    }
}
