// File: crates/cellplot-core/src/error.rs
// Summary: Error type shared by table loading and chart rendering.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

/// Why a data line was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowFault {
    /// Token count differs from the first data row.
    Ragged { expected: usize, found: usize },
    /// A token that does not parse as `f64`.
    NotANumber(String),
}

impl std::fmt::Display for RowFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowFault::Ragged { expected, found } => {
                write!(f, "expected {expected} columns, found {found}")
            }
            RowFault::NotANumber(tok) => write!(f, "'{tok}' is not a number"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// `line` is the 1-based physical line in the input.
    #[error("malformed row at line {line}: {fault}")]
    MalformedRow { line: usize, fault: RowFault },

    #[error("table has no data rows")]
    EmptyTable,

    #[error("table needs at least 2 columns, found {0}")]
    TooFewColumns(usize),

    #[error("column index {index} out of range for table with {columns} columns")]
    IndexOutOfRange { index: usize, columns: usize },

    #[error("column {0} is the independent variable and cannot be plotted against itself")]
    DependentIsIndependent(usize),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("duplicate field '{0}' in column layout")]
    DuplicateField(String),

    #[error("layout has {layout} fields but table has {table} columns")]
    LayoutMismatch { layout: usize, table: usize },

    #[error("unsupported output format '{0}' (expected png or svg)")]
    UnsupportedFormat(String),

    #[error("failed to create {0} surface")]
    Surface(&'static str),

    #[error("failed to encode {0}")]
    Encode(&'static str),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
