// File: crates/cellplot-core/src/axis.rs
// Summary: Axis model with label and resolved display range.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn range(&self) -> (f64, f64) { (self.min, self.max) }

    /// Signed span; negative when the axis runs backwards.
    pub fn span(&self) -> f64 { self.max - self.min }
}
