// File: crates/cellplot-core/benches/render_bench.rs
// Summary: PNG rendering cost for long multi-series tables, with and without downsampling.

use anyhow::Result;
use cellplot_core::{render_with, ChartRequest, RenderOptions, SeriesSpec, Table};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_table(n: usize) -> Table {
    let rows = (0..n)
        .map(|i| {
            let t = i as f64 * 0.01;
            vec![t, (t * 0.01).sin() * 60.0 - 30.0, (t * 0.02).cos(), (t * 0.005).sin()]
        })
        .collect();
    Table::from_rows(rows).expect("table")
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    let req = ChartRequest::new(0)
        .series(SeriesSpec::new(1, "V"))
        .series(SeriesSpec::new(2, "m"))
        .series(SeriesSpec::new(3, "x").dashed());
    for &n in &[10_000usize, 50_000usize] {
        let table = build_table(n);
        for max_points in [None, Some(2_000usize)] {
            let label = match max_points { Some(m) => format!("n{n}_lttb{m}"), None => format!("n{n}_full") };
            group.bench_function(label, |b| {
                let mut opts = RenderOptions::default();
                opts.draw_labels = false;
                opts.max_points = max_points;
                b.iter(|| -> Result<()> {
                    let chart = render_with(&table, &req, &opts)?;
                    black_box(chart.to_png_bytes()?);
                    Ok(())
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
