//! Typed benchmark records and field normalization.

use crate::error::ReportError;
use crate::schema::Column;
use crate::table::Table;

/// One measured data point. Only the fields named by the report's column set
/// are populated; the rest stay `None` and are never referenced.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    /// Target maximum number of items the filter was sized for.
    pub capacity: u64,
    /// Configured target false-positive probability, in (0, 1).
    pub error_rate: f64,
    /// Measured false-positive rate, in percent.
    pub false_positive_rate: Option<f64>,
    /// Number of items actually inserted during the run.
    pub insert_count: Option<u64>,
    /// Total bits allocated by the filter (the `m` column).
    pub bit_array_size: Option<u64>,
    /// Parsed per-check latency. `None` when the raw string was malformed;
    /// the row is kept but contributes no point to time charts.
    pub check_time_ms: Option<f64>,
}

impl BenchmarkRecord {
    pub fn memory_bytes(&self) -> Option<f64> {
        self.bit_array_size.map(|m| m as f64 / 8.0)
    }

    pub fn memory_kb(&self) -> Option<f64> {
        self.memory_bytes().map(|b| b / 1024.0)
    }

    pub fn memory_mb(&self) -> Option<f64> {
        self.memory_kb().map(|kb| kb / 1024.0)
    }
}

/// Parse an encoded check-time string such as `"123.456ms"`.
///
/// Only the literal `ms` suffix with a decimal prefix is recognized; any
/// other suffix or a non-numeric prefix yields `None`, never an error.
pub fn parse_check_time(raw: &str) -> Option<f64> {
    raw.strip_suffix("ms")?.trim().parse().ok()
}

/// Convert every raw row into a typed record.
///
/// Coercion of required columns is total: the first unparsable required
/// field aborts ingestion for the whole file. `checkTime` is the one
/// exception; its parse failure degrades that row to a missing point.
pub fn normalize(table: &Table, columns: &[Column]) -> Result<Vec<BenchmarkRecord>, ReportError> {
    let mut records = Vec::with_capacity(table.len());

    for (idx, row) in table.rows().iter().enumerate() {
        let line = idx + 1;
        let mut record = BenchmarkRecord {
            capacity: 0,
            error_rate: 0.0,
            false_positive_rate: None,
            insert_count: None,
            bit_array_size: None,
            check_time_ms: None,
        };

        for column in columns {
            let raw = table
                .index_of(*column)
                .and_then(|i| row.get(i))
                .unwrap_or("");
            match column {
                Column::Capacity => {
                    let n: u64 = parse_field(raw, *column, line)?;
                    if n == 0 {
                        return Err(ReportError::InvalidRecord {
                            column: column.name(),
                            value: raw.to_string(),
                            line,
                        });
                    }
                    record.capacity = n;
                }
                Column::ErrorRate => {
                    let p: f64 = parse_field(raw, *column, line)?;
                    if p <= 0.0 || p >= 1.0 {
                        return Err(ReportError::InvalidRecord {
                            column: column.name(),
                            value: raw.to_string(),
                            line,
                        });
                    }
                    record.error_rate = p;
                }
                Column::FalsePositiveRate => {
                    record.false_positive_rate = Some(parse_field(raw, *column, line)?);
                }
                Column::InsertCount => {
                    record.insert_count = Some(parse_field(raw, *column, line)?);
                }
                Column::BitArraySize => {
                    record.bit_array_size = Some(parse_field(raw, *column, line)?);
                }
                Column::CheckTime => {
                    record.check_time_ms = parse_check_time(raw);
                }
            }
        }

        records.push(record);
    }

    Ok(records)
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    column: Column,
    line: usize,
) -> Result<T, ReportError> {
    raw.parse().map_err(|_| ReportError::InvalidRecord {
        column: column.name(),
        value: raw.to_string(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_time_round_trip() {
        assert_eq!(parse_check_time("12.5ms"), Some(12.5));
        assert_eq!(parse_check_time("123.456ms"), Some(123.456));
        assert_eq!(parse_check_time("0ms"), Some(0.0));
    }

    #[test]
    fn check_time_rejects_other_suffixes() {
        assert_eq!(parse_check_time(""), None);
        assert_eq!(parse_check_time("ms"), None);
        assert_eq!(parse_check_time("5s"), None);
        assert_eq!(parse_check_time("5us"), None);
        assert_eq!(parse_check_time("bad"), None);
        assert_eq!(parse_check_time("12.5msx"), None);
    }

    #[test]
    fn memory_unit_division() {
        let record = BenchmarkRecord {
            capacity: 1000,
            error_rate: 0.01,
            false_positive_rate: None,
            insert_count: None,
            bit_array_size: Some(8 * 1024 * 1024),
            check_time_ms: None,
        };
        assert_eq!(record.memory_bytes(), Some(1024.0 * 1024.0));
        assert_eq!(record.memory_kb(), Some(1024.0));
        assert_eq!(record.memory_mb(), Some(1.0));
    }

    fn table(data: &str, columns: &[Column]) -> Table {
        Table::from_reader(data.as_bytes(), columns).unwrap()
    }

    #[test]
    fn malformed_check_time_keeps_the_row() {
        let columns = &[Column::ErrorRate, Column::Capacity, Column::CheckTime];
        let t = table("errorRate,capacity,checkTime\n0.05,500,bad\n", columns);
        let records = normalize(&t, columns).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].check_time_ms, None);
    }

    #[test]
    fn malformed_required_column_aborts_the_file() {
        let columns = &[Column::ErrorRate, Column::Capacity];
        let t = table("errorRate,capacity\n0.1,1000\n0.2,oops\n", columns);
        let err = normalize(&t, columns).unwrap_err();
        match err {
            ReportError::InvalidRecord {
                column,
                value,
                line,
            } => {
                assert_eq!(column, "capacity");
                assert_eq!(value, "oops");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_rate_outside_open_interval_is_invalid() {
        let columns = &[Column::ErrorRate, Column::Capacity];
        for bad in ["0", "1", "1.5", "-0.1"] {
            let t = table(&format!("errorRate,capacity\n{bad},1000\n"), columns);
            assert!(matches!(
                normalize(&t, columns),
                Err(ReportError::InvalidRecord { .. })
            ));
        }
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let columns = &[Column::ErrorRate, Column::Capacity];
        let t = table("errorRate,capacity\n0.1,0\n", columns);
        assert!(matches!(
            normalize(&t, columns),
            Err(ReportError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn unreferenced_fields_stay_absent() {
        let columns = &[Column::ErrorRate, Column::Capacity];
        let t = table("errorRate,capacity,m\n0.1,1000,9585\n", columns);
        let records = normalize(&t, columns).unwrap();
        assert_eq!(records[0].bit_array_size, None);
        assert_eq!(records[0].insert_count, None);
    }
}
