// File: crates/cellplot-core/tests/output.rs
// Purpose: End-to-end output: PNG/SVG files, RGBA buffers, format selection.

use cellplot_core::{parse_str, render_with, ChartRequest, PlotError, RenderOptions, SeriesSpec, TableFormat};

fn chart(draw_labels: bool) -> cellplot_core::RenderedChart {
    let t = parse_str("0 -84 0.1\n1 20 0.9\n2 -10 0.5\n3 -84 0.1\n", TableFormat::Whitespace).unwrap();
    let req = ChartRequest::new(0)
        .series(SeriesSpec::new(1, "V"))
        .series(SeriesSpec::new(2, "m").dashed())
        .with_labels("Time [ms]", "Potential [mV]")
        .with_title("potential")
        .with_legend(true);
    let mut opts = RenderOptions::default();
    opts.draw_labels = draw_labels;
    render_with(&t, &req, &opts).expect("render")
}

#[test]
fn writes_png_and_svg_by_extension() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let c = chart(true);

    let png = dir.path().join("nested/potential.png");
    c.write_to(&png).expect("write png");
    let bytes = std::fs::read(&png).expect("read png");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let svg = dir.path().join("potential.svg");
    c.write_to(&svg).expect("write svg");
    let text = std::fs::read_to_string(&svg).expect("read svg");
    assert!(text.contains("<svg"), "should be an SVG document");
}

#[test]
fn unknown_extension_rejected_without_writing() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let eps = dir.path().join("gates.eps");
    assert!(matches!(chart(false).write_to(&eps), Err(PlotError::UnsupportedFormat(_))));
    assert!(!eps.exists());
}

#[test]
fn rgba8_buffer_shape() {
    let c = chart(false);
    let (px, w, h, stride) = c.to_rgba8().expect("rgba render");
    assert_eq!((w as i32, h as i32), c.size());
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);
    // opaque background, white in the light theme
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
}

#[test]
fn extreme_magnitudes_still_encode() {
    let t = parse_str("0 -1e308\n1 1e308\n", TableFormat::Whitespace).unwrap();
    let autoscaled = render_with(&t, &ChartRequest::new(0).series(SeriesSpec::new(1, "V")), &RenderOptions::default())
        .expect("render");
    let (lo, hi) = autoscaled.y_range();
    assert!(lo.is_finite() && hi.is_finite());
    assert!(autoscaled.to_png_bytes().expect("png").starts_with(&[137, 80, 78, 71]));

    let fixed = ChartRequest::new(0).series(SeriesSpec::new(1, "V")).with_y_bounds(-1.7e308, 1.7e308);
    let c = render_with(&t, &fixed, &RenderOptions::default()).expect("render");
    assert!(!c.to_svg_bytes().is_empty());
}
