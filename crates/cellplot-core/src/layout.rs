// File: crates/cellplot-core/src/layout.rs
// Summary: Named column layouts so callers refer to fields by name instead of bare indices.

use crate::error::{PlotError, Result};
use crate::table::Table;

/// Ordered field names; position in the list is the column index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    fields: Vec<String>,
}

impl ColumnLayout {
    /// Contract: names are unique.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for f in fields {
            let f = f.into();
            if out.contains(&f) {
                return Err(PlotError::DuplicateField(f));
            }
            out.push(f);
        }
        Ok(Self { fields: out })
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Column index of `name`.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| PlotError::UnknownField(name.to_string()))
    }

    pub fn name(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Verify the table is exactly as wide as the layout.
    pub fn check(&self, table: &Table) -> Result<()> {
        if self.fields.len() != table.column_count() {
            return Err(PlotError::LayoutMismatch {
                layout: self.fields.len(),
                table: table.column_count(),
            });
        }
        Ok(())
    }

    /// Extract a column by field name.
    pub fn extract(&self, table: &Table, name: &str) -> Result<Vec<f64>> {
        table.column(self.column(name)?)
    }
}
