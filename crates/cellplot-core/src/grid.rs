// File: crates/cellplot-core/src/grid.rs
// Summary: Grid/tick layout helpers.

/// Step of the form {1, 2, 5} x 10^k giving roughly `target` intervals over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let span = span.abs();
    if !span.is_finite() || span <= 0.0 { return 1.0; }
    let raw = span / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 { 1.0 } else if norm <= 2.0 { 2.0 } else if norm <= 5.0 { 5.0 } else { 10.0 };
    nice * mag
}

/// Tick values inside `[min(a, b), max(a, b)]`, on multiples of a nice step.
pub fn nice_ticks(a: f64, b: f64, target: usize) -> Vec<f64> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if !lo.is_finite() || !hi.is_finite() || !(hi - lo).is_finite() { return Vec::new(); }
    let step = nice_step(hi - lo, target);
    let (first, last) = ((lo / step).ceil(), (hi / step).floor());
    // count in f64; the i64 difference can overflow
    if last < first || last - first > 1000.0 { return Vec::new(); }
    (first as i64..=last as i64)
        .map(|k| {
            let v = k as f64 * step;
            // snap -0.0 and float noise like 0.30000000000000004
            if v.abs() < step * 1e-9 { 0.0 } else { v }
        })
        .collect()
}

/// Tick label with just enough decimals for `step`.
pub fn format_tick(v: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    let a = v.abs();
    if a != 0.0 && (a >= 1e5 || a < 1e-4) {
        return format!("{v:.1e}");
    }
    format!("{v:.decimals$}")
}
