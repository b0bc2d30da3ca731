//! Error types for the report pipeline.

use std::path::PathBuf;

/// Errors that can occur while building a single report.
///
/// Every variant is caught at the report driver boundary and converted into
/// an [`Outcome`](crate::report::Outcome); none of them escape a report run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The input table does not exist. Treated as a skip, not a failure.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// A column required by the report is absent from the header row.
    #[error("missing required column '{column}' in header")]
    Schema { column: &'static str },

    /// A required field could not be coerced. Aborts ingestion of the whole
    /// file; there are no partial reports from a malformed input.
    #[error("row {line}: column '{column}' has invalid value '{value}'")]
    InvalidRecord {
        column: &'static str,
        value: String,
        line: usize,
    },

    /// Selection produced zero plottable points.
    #[error("no plottable data")]
    Empty,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render error: {0}")]
    Render(String),
}
