//! CSV ingestion.
//!
//! Reads one benchmark table into raw rows and validates that every column
//! the report needs is present in the header. Values stay untyped here;
//! coercion happens in [`crate::record`].

use std::io::Read;
use std::path::Path;

use crate::error::ReportError;
use crate::schema::Column;

/// A parsed input table: the header row plus every data row, in file order.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    /// Parse a table from any reader, verifying `required` columns exist.
    pub fn from_reader<R: Read>(reader: R, required: &[Column]) -> Result<Table, ReportError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();
        for column in required {
            if !headers.iter().any(|h| h == column.name()) {
                return Err(ReportError::Schema {
                    column: column.name(),
                });
            }
        }

        let mut rows = Vec::new();
        for row in csv.records() {
            rows.push(row?);
        }

        Ok(Table { headers, rows })
    }

    /// Position of a column within each row.
    pub fn index_of(&self, column: Column) -> Option<usize> {
        self.headers.iter().position(|h| h == column.name())
    }

    pub fn rows(&self) -> &[csv::StringRecord] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Read a table from disk. A missing file is a skip condition for the
/// report, not a failure.
pub fn read_table(path: &Path, required: &[Column]) -> Result<Table, ReportError> {
    if !path.exists() {
        return Err(ReportError::MissingInput(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    Table::from_reader(file, required)
}
