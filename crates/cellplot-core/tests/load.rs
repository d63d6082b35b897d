// File: crates/cellplot-core/tests/load.rs
// Purpose: Table loading from files: shape, cell values, and error taxonomy.

use std::io::Write;

use cellplot_core::{load, load_with, PlotError, RowFault, TableFormat};

fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("tmp file");
    f.write_all(contents.as_bytes()).expect("write tmp");
    f
}

#[test]
fn loads_rows_and_columns_in_order() {
    let f = write_tmp("0 -84.0 0.001\n0.05 -83.9 0.0012\n\n0.10 -83.7 1.5e-3\n");
    let t = load(f.path()).expect("load");
    assert_eq!(t.row_count(), 3);
    assert_eq!(t.column_count(), 3);
    assert_eq!(t.row(0), Some(&[0.0, -84.0, 0.001][..]));
    assert_eq!(t.get(2, 2), Some(1.5e-3));
    assert_eq!(t.column(0).unwrap(), vec![0.0, 0.05, 0.10]);
}

#[test]
fn ragged_second_row_is_malformed() {
    let f = write_tmp("0 1 2\n1 3\n2 5 6\n");
    match load(f.path()) {
        Err(PlotError::MalformedRow { line, fault }) => {
            assert_eq!(line, 2);
            assert_eq!(fault, RowFault::Ragged { expected: 3, found: 2 });
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn non_numeric_token_is_malformed() {
    let f = write_tmp("0 1\n1 nope\n");
    let err = load(f.path()).unwrap_err();
    assert!(matches!(err, PlotError::MalformedRow { line: 2, fault: RowFault::NotANumber(_) }));
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("bernus.txt");
    match load(&path) {
        Err(PlotError::FileNotFound(p)) => assert_eq!(p, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn empty_file_has_no_table() {
    let f = write_tmp("\n\n");
    assert!(matches!(load(f.path()), Err(PlotError::EmptyTable)));
}

#[test]
fn csv_format() {
    let f = write_tmp("# V,v_inf\n-100,1.0\n-90,0.98\n");
    let t = load_with(f.path(), TableFormat::Csv).expect("load csv");
    assert_eq!(t.row_count(), 2);
    assert_eq!(t.get(1, 1), Some(0.98));
}
