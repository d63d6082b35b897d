// File: crates/cellplot/src/charts.rs
// Summary: Column layouts of the Bernus simulator outputs and the charts drawn from each.

use cellplot_core::{ChartRequest, ColumnLayout, Result, SeriesSpec};

/// `integrate_bernus.out` / `probe_bernus.out`: state trajectory over time.
pub const STATE_FIELDS: [&str; 8] = ["t", "V", "m", "v", "f", "to", "x", "Iion"];

/// Ionic currents over time.
pub const CURRENT_FIELDS: [&str; 12] = [
    "t", "i_na", "i_ca", "i_to", "i_k", "i_k1", "i_b_ca", "i_b_na", "i_na_k", "i_na_ca", "V", "Iion",
];

/// `probe_bernus_functions.out`: steady states and time constants swept over V.
pub const FUNCTION_FIELDS: [&str; 5] = ["V", "v_inf", "tau_v", "x_inf", "tau_x"];

const GATES: [&str; 5] = ["m", "v", "f", "to", "x"];
const TIME_MS: &str = "Time [ms]";
const POTENTIAL_MV: &str = "Potential [mV]";
const POTENTIAL_BOUNDS: (f64, f64) = (-100.0, 60.0);

/// A chart request plus the name its output file is derived from.
pub struct NamedRequest {
    pub name: &'static str,
    pub request: ChartRequest,
}

fn named(name: &'static str, request: ChartRequest) -> NamedRequest {
    NamedRequest { name, request: request.with_title(name) }
}

fn over_time(layout: &ColumnLayout) -> Result<ChartRequest> {
    ChartRequest::over_field(layout, "t")
}

/// Potential, total ionic current, and gate variables of one integration run.
pub fn integrate(layout: &ColumnLayout) -> Result<Vec<NamedRequest>> {
    let (lo, hi) = POTENTIAL_BOUNDS;
    Ok(vec![
        named(
            "potential",
            over_time(layout)?
                .series(SeriesSpec::field(layout, "V")?)
                .with_y_bounds(lo, hi)
                .with_labels(TIME_MS, POTENTIAL_MV),
        ),
        named(
            "current",
            over_time(layout)?
                .series(SeriesSpec::field(layout, "Iion")?)
                .with_labels(TIME_MS, "Current [µA/µF]"),
        ),
        gates(layout)?,
    ])
}

/// Potential with the ionic current overlaid, then gate variables.
pub fn probe(layout: &ColumnLayout) -> Result<Vec<NamedRequest>> {
    let (lo, hi) = POTENTIAL_BOUNDS;
    Ok(vec![
        named(
            "potential_current",
            over_time(layout)?
                .series(SeriesSpec::field(layout, "V")?)
                .series(SeriesSpec::field(layout, "Iion")?)
                .with_y_bounds(lo, hi)
                .with_labels(TIME_MS, POTENTIAL_MV)
                .with_legend(true),
        ),
        gates(layout)?,
    ])
}

fn gates(layout: &ColumnLayout) -> Result<NamedRequest> {
    Ok(named(
        "gates",
        over_time(layout)?
            .fields(layout, &GATES)?
            .with_labels(TIME_MS, "Gate variable")
            .with_legend(true),
    ))
}

/// All membrane currents on one axis, the potential on a second axis.
pub fn currents(layout: &ColumnLayout) -> Result<Vec<NamedRequest>> {
    let mut req = over_time(layout)?
        .fields(layout, &["i_na", "i_ca", "i_to", "i_k", "i_k1", "i_b_ca"])?
        .with_labels(TIME_MS, "Current [µA/µF]")
        .with_secondary_label(POTENTIAL_MV)
        .with_legend(true);
    for name in ["i_b_na", "i_na_k", "i_na_ca"] {
        req = req.series(SeriesSpec::field(layout, name)?.dashed());
    }
    req = req
        .series(SeriesSpec::field(layout, "V")?.dashed().on_secondary())
        .series(SeriesSpec::field(layout, "Iion")?.dashed());
    Ok(vec![named("currents", req)])
}

/// One chart per gating function against membrane potential.
pub fn functions(layout: &ColumnLayout) -> Result<Vec<NamedRequest>> {
    let sweep = |name: &'static str, y_label: &str| -> Result<NamedRequest> {
        Ok(named(
            name,
            ChartRequest::over_field(layout, "V")?
                .series(SeriesSpec::field(layout, name)?)
                .with_labels("Membrane potential [mV]", y_label),
        ))
    };
    Ok(vec![
        sweep("v_inf", "v∞")?,
        sweep("tau_v", "τv [ms]")?,
        sweep("x_inf", "x∞")?,
        sweep("tau_x", "τx [ms]")?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellplot_core::{render, AxisSide, LineStyle, Table};

    fn layout(fields: &[&str]) -> ColumnLayout {
        ColumnLayout::new(fields.iter().copied()).unwrap()
    }

    fn ramp_table(columns: usize) -> Table {
        let rows = (0..4).map(|r| (0..columns).map(|c| (r * 10 + c) as f64).collect::<Vec<f64>>()).collect();
        Table::from_rows(rows).unwrap()
    }

    #[test]
    fn integrate_charts_use_named_columns() {
        let l = layout(&STATE_FIELDS);
        let reqs = integrate(&l).unwrap();
        assert_eq!(reqs.iter().map(|r| r.name).collect::<Vec<_>>(), vec!["potential", "current", "gates"]);
        assert_eq!(reqs[0].request.series[0].column, 1);
        assert_eq!(reqs[0].request.y_bounds, Some((-100.0, 60.0)));
        assert_eq!(reqs[1].request.series[0].column, 7);
        assert_eq!(reqs[2].request.series.iter().map(|s| s.column).collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn every_script_renders_against_its_layout() {
        let cases: [(&[&str], fn(&ColumnLayout) -> Result<Vec<NamedRequest>>); 4] = [
            (&STATE_FIELDS, integrate),
            (&STATE_FIELDS, probe),
            (&CURRENT_FIELDS, currents),
            (&FUNCTION_FIELDS, functions),
        ];
        for (fields, build) in cases {
            let l = layout(fields);
            let t = ramp_table(fields.len());
            l.check(&t).unwrap();
            for r in build(&l).unwrap() {
                let c = render(&t, &r.request).unwrap();
                assert_eq!(c.x_range().0, t.get(0, r.request.x_index).unwrap(), "{}", r.name);
            }
        }
    }

    #[test]
    fn currents_put_potential_on_second_axis() {
        let l = layout(&CURRENT_FIELDS);
        let reqs = currents(&l).unwrap();
        let req = &reqs[0].request;
        assert_eq!(req.series.len(), 11);
        let v = req.series.iter().find(|s| s.label == "V").unwrap();
        assert_eq!(v.axis, AxisSide::Secondary);
        assert_eq!(req.series.iter().filter(|s| s.style == LineStyle::Dashed).count(), 5);
        let tail: Vec<&str> = req.series[9..].iter().map(|s| s.label.as_str()).collect();
        assert_eq!(tail, vec!["V", "Iion"]);
    }

    #[test]
    fn functions_sweep_over_potential() {
        let l = layout(&FUNCTION_FIELDS);
        let reqs = functions(&l).unwrap();
        assert_eq!(reqs.len(), 4);
        assert!(reqs.iter().all(|r| r.request.x_index == 0));
    }
}
