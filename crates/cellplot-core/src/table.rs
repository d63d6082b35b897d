// File: crates/cellplot-core/src/table.rs
// Summary: Numeric table model and loader for simulator output (whitespace or CSV rows).

use std::path::Path;

use log::debug;

use crate::error::{PlotError, Result, RowFault};

/// How columns are separated in the input file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TableFormat {
    /// Runs of spaces/tabs, as written by the simulator.
    #[default]
    Whitespace,
    /// Comma-separated, no header row.
    Csv,
}

/// Immutable row-major grid of `f64`.
/// Contract: at least one row and two columns; every row has the same width.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl Table {
    /// Build a table from in-memory rows, with the same checks as the loader.
    /// Rows are numbered from 1 in errors.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let mut b = TableBuilder::default();
        for (i, row) in rows.into_iter().enumerate() {
            b.push_values(i + 1, row)?;
        }
        b.finish()
    }

    pub fn row_count(&self) -> usize { self.rows }
    pub fn column_count(&self) -> usize { self.columns }

    /// Value at `(row, column)`, `None` when either index is out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(self.data[row * self.columns + column])
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.data[start..start + self.columns])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.columns)
    }

    /// Copy out one column.
    pub fn column(&self, index: usize) -> Result<Vec<f64>> {
        self.check_column(index)?;
        Ok(self.rows().map(|r| r[index]).collect())
    }

    pub fn check_column(&self, index: usize) -> Result<()> {
        if index >= self.columns {
            return Err(PlotError::IndexOutOfRange { index, columns: self.columns });
        }
        Ok(())
    }
}

/// Load a whitespace-delimited table.
pub fn load(path: impl AsRef<Path>) -> Result<Table> {
    load_with(path, TableFormat::Whitespace)
}

pub fn load_with(path: impl AsRef<Path>, format: TableFormat) -> Result<Table> {
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PlotError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    let table = parse_str(&text, format)?;
    debug!(
        "loaded {}: {} rows x {} columns",
        path.display(),
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Parse table text. Blank lines and lines starting with `#` are skipped.
pub fn parse_str(text: &str, format: TableFormat) -> Result<Table> {
    let mut b = TableBuilder::default();
    match format {
        TableFormat::Whitespace => {
            for (i, line) in text.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                b.push_tokens(i + 1, line.split_whitespace())?;
            }
        }
        TableFormat::Csv => {
            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .comment(Some(b'#'))
                .trim(csv::Trim::All)
                .from_reader(text.as_bytes());
            for rec in rdr.records() {
                let rec = rec?;
                let line = rec.position().map(|p| p.line() as usize).unwrap_or(0);
                // the reader only sees `#` in the first byte; indented comments land here
                if rec.iter().all(str::is_empty) || rec.get(0).is_some_and(|f| f.starts_with('#')) {
                    continue;
                }
                b.push_tokens(line, rec.iter())?;
            }
        }
    }
    b.finish()
}

#[derive(Default)]
struct TableBuilder {
    columns: Option<usize>,
    rows: usize,
    data: Vec<f64>,
}

impl TableBuilder {
    fn push_tokens<'a>(&mut self, line: usize, tokens: impl Iterator<Item = &'a str>) -> Result<()> {
        let tokens: Vec<&str> = tokens.collect();
        self.check_width(line, tokens.len())?;
        for tok in tokens {
            let v = tok.parse::<f64>().map_err(|_| PlotError::MalformedRow {
                line,
                fault: RowFault::NotANumber(tok.to_string()),
            })?;
            self.data.push(v);
        }
        self.rows += 1;
        Ok(())
    }

    fn push_values(&mut self, line: usize, values: Vec<f64>) -> Result<()> {
        self.check_width(line, values.len())?;
        self.data.extend(values);
        self.rows += 1;
        Ok(())
    }

    fn check_width(&mut self, line: usize, found: usize) -> Result<()> {
        match self.columns {
            None => {
                if found < 2 {
                    return Err(PlotError::TooFewColumns(found));
                }
                self.columns = Some(found);
            }
            Some(expected) if expected != found => {
                return Err(PlotError::MalformedRow {
                    line,
                    fault: RowFault::Ragged { expected, found },
                });
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<Table> {
        match self.columns {
            Some(columns) if self.rows > 0 => Ok(Table { rows: self.rows, columns, data: self.data }),
            _ => Err(PlotError::EmptyTable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scientific_notation_and_tabs() {
        let t = parse_str("0.0\t-8.4e1  1E-3\n1.5 -8.39e+01\t2e-3\n", TableFormat::Whitespace).unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.get(0, 1), Some(-84.0));
        assert_eq!(t.get(1, 2), Some(0.002));
        assert_eq!(t.get(2, 0), None);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let t = parse_str("# t V\n\n0 1\n   \n1 2\n", TableFormat::Whitespace).unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.row(1), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn reports_physical_line_of_bad_token() {
        let err = parse_str("0 1\n\n1 abc\n", TableFormat::Whitespace).unwrap_err();
        match err {
            PlotError::MalformedRow { line, fault } => {
                assert_eq!(line, 3);
                assert_eq!(fault, RowFault::NotANumber("abc".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_single_column_and_empty_input() {
        assert!(matches!(parse_str("1\n2\n", TableFormat::Whitespace), Err(PlotError::TooFewColumns(1))));
        assert!(matches!(parse_str("\n# only a comment\n", TableFormat::Whitespace), Err(PlotError::EmptyTable)));
    }

    #[test]
    fn csv_rows_without_header() {
        let t = parse_str("0, 1.5, 2\n1,2.5,3\n", TableFormat::Csv).unwrap();
        assert_eq!(t.column(1).unwrap(), vec![1.5, 2.5]);
    }

    #[test]
    fn csv_skips_indented_comments_like_whitespace_mode() {
        let text = "  # t, V\n0,1\n\t# note\n1,2\n";
        let csv = parse_str(text, TableFormat::Csv).unwrap();
        let ws = parse_str(&text.replace(',', " "), TableFormat::Whitespace).unwrap();
        assert_eq!(csv.row_count(), 2);
        assert_eq!(csv.column(1).unwrap(), ws.column(1).unwrap());
    }

    #[test]
    fn csv_ragged_row_reports_line() {
        let err = parse_str("0,1,2\n1,2\n", TableFormat::Csv).unwrap_err();
        assert!(matches!(
            err,
            PlotError::MalformedRow { line: 2, fault: RowFault::Ragged { expected: 3, found: 2 } }
        ));
    }

    #[test]
    fn column_out_of_range() {
        let t = Table::from_rows(vec![vec![0.0, 1.0], vec![1.0, 2.0]]).unwrap();
        assert!(matches!(t.column(2), Err(PlotError::IndexOutOfRange { index: 2, columns: 2 })));
    }
}
