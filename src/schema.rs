//! Report definitions.
//!
//! The five reports share one pipeline shape (parse, normalize, select,
//! render); everything that varies between them lives in the [`ReportSpec`]
//! returned by [`ReportKind::spec`].

use clap::ValueEnum;
use serde::Serialize;

use crate::record::BenchmarkRecord;

/// The five report types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Per-check latency vs configured error rate
    CheckTime,
    /// Memory footprint vs configured error rate, all records
    MemoryAggregate,
    /// Memory footprint vs configured error rate at one fixed capacity
    MemoryFixedCapacity,
    /// Measured false-positive rate vs configured error rate, one line per capacity
    FpRateByCapacity,
    /// Measured false-positive rate vs number of inserted items
    InsertCount,
}

impl ReportKind {
    pub fn all() -> Vec<ReportKind> {
        vec![
            ReportKind::CheckTime,
            ReportKind::MemoryAggregate,
            ReportKind::MemoryFixedCapacity,
            ReportKind::FpRateByCapacity,
            ReportKind::InsertCount,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::CheckTime => "check-time",
            ReportKind::MemoryAggregate => "memory-aggregate",
            ReportKind::MemoryFixedCapacity => "memory-fixed-capacity",
            ReportKind::FpRateByCapacity => "fp-rate-by-capacity",
            ReportKind::InsertCount => "insert-count",
        }
    }

    /// The full pipeline configuration for this report.
    pub fn spec(&self) -> ReportSpec {
        match self {
            ReportKind::CheckTime => ReportSpec {
                kind: *self,
                input_file: "errRate_checkTime.csv",
                output_file: "errRate_checkTime.png",
                columns: &[Column::ErrorRate, Column::Capacity, Column::CheckTime],
                grouping: Grouping::Single,
                x: XField::ErrorRate,
                y: Metric::CheckTimeMs,
                chart: ChartSpec {
                    title: "Bloom Filter Check Time vs. Expected Error Rate",
                    x_label: "Expected Error Rate (p)",
                    y_label: "Check Time (ms)",
                    x_scale: XScale::ErrorRate,
                    legend: false,
                    size: (1000, 600),
                },
            },
            ReportKind::MemoryAggregate => ReportSpec {
                kind: *self,
                input_file: "errRate_memUsage.csv",
                output_file: "errRate_memUsage.png",
                columns: &[Column::ErrorRate, Column::BitArraySize, Column::Capacity],
                grouping: Grouping::Single,
                x: XField::ErrorRate,
                y: Metric::MemoryMegabytes,
                chart: ChartSpec {
                    title: "Bloom Filter Memory Usage vs. Expected Error Rate",
                    x_label: "Expected Error Rate (p)",
                    y_label: "Total Memory Usage (MB)",
                    x_scale: XScale::ErrorRate,
                    legend: false,
                    size: (1000, 600),
                },
            },
            ReportKind::MemoryFixedCapacity => ReportSpec {
                kind: *self,
                input_file: "bloom_filter_results.csv",
                output_file: "bloom_filter_memory_usage.png",
                columns: &[Column::ErrorRate, Column::BitArraySize, Column::Capacity],
                grouping: Grouping::FixedCapacity { capacity: None },
                x: XField::ErrorRate,
                y: Metric::MemoryBits,
                chart: ChartSpec {
                    title: "Bloom Filter Memory Usage vs. Expected Error Rate (fixed n)",
                    x_label: "Expected Error Rate (p)",
                    y_label: "Total Memory Usage (m - number of bits)",
                    x_scale: XScale::ErrorRate,
                    legend: false,
                    size: (1000, 600),
                },
            },
            ReportKind::FpRateByCapacity => ReportSpec {
                kind: *self,
                input_file: "bloom_filter_results.csv",
                output_file: "bloom_filter_plot.png",
                columns: &[
                    Column::ErrorRate,
                    Column::FalsePositiveRate,
                    Column::Capacity,
                ],
                grouping: Grouping::ByCapacity,
                x: XField::ErrorRate,
                y: Metric::FalsePositiveRate,
                chart: ChartSpec {
                    title: "Bloom Filter False Positive Rate vs. Expected Error Rate",
                    x_label: "Expected Error Rate (p)",
                    y_label: "Actual False Positive Rate (%)",
                    x_scale: XScale::ErrorRate,
                    legend: true,
                    size: (1200, 700),
                },
            },
            ReportKind::InsertCount => ReportSpec {
                kind: *self,
                input_file: "realAmount_fpRate.csv",
                output_file: "realAmount_fpRate.png",
                columns: &[
                    Column::Capacity,
                    Column::ErrorRate,
                    Column::InsertCount,
                    Column::FalsePositiveRate,
                ],
                grouping: Grouping::Single,
                x: XField::InsertCount,
                y: Metric::FalsePositiveRate,
                chart: ChartSpec {
                    title: "Bloom Filter False Positive Rate vs. Real Amount",
                    x_label: "Real Amount (Number of Inserted Items)",
                    y_label: "False Positive Rate (%)",
                    x_scale: XScale::Linear,
                    legend: false,
                    size: (1000, 600),
                },
            },
        }
    }
}

/// Columns the benchmark harness writes. Lookup is by header name; the
/// position of a column within the file does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ErrorRate,
    Capacity,
    CheckTime,
    BitArraySize,
    FalsePositiveRate,
    InsertCount,
}

impl Column {
    /// Header name as written by the harness.
    pub fn name(&self) -> &'static str {
        match self {
            Column::ErrorRate => "errorRate",
            Column::Capacity => "capacity",
            Column::CheckTime => "checkTime",
            Column::BitArraySize => "m",
            Column::FalsePositiveRate => "falsePositiveRate",
            Column::InsertCount => "insertCount",
        }
    }
}

/// How records are split into series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// All records form one series.
    Single,
    /// One series per distinct capacity, in first-seen order.
    ByCapacity,
    /// Only records at one capacity; `None` selects the first capacity
    /// encountered in file order.
    FixedCapacity { capacity: Option<u64> },
}

/// Which record field supplies the x value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XField {
    ErrorRate,
    InsertCount,
}

impl XField {
    pub fn value(&self, record: &BenchmarkRecord) -> Option<f64> {
        match self {
            XField::ErrorRate => Some(record.error_rate),
            XField::InsertCount => record.insert_count.map(|n| n as f64),
        }
    }
}

/// Which derived metric supplies the y value. A `None` here drops the point
/// but keeps the record (the check-time sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    CheckTimeMs,
    MemoryBits,
    MemoryMegabytes,
    FalsePositiveRate,
}

impl Metric {
    pub fn value(&self, record: &BenchmarkRecord) -> Option<f64> {
        match self {
            Metric::CheckTimeMs => record.check_time_ms,
            Metric::MemoryBits => record.bit_array_size.map(|m| m as f64),
            Metric::MemoryMegabytes => record.memory_mb(),
            Metric::FalsePositiveRate => record.false_positive_rate,
        }
    }
}

/// Axis semantics and labeling for one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_scale: XScale,
    /// One legend entry per series label, when more than one series exists.
    pub legend: bool,
    /// Canvas size in pixels.
    pub size: (u32, u32),
}

/// X axis scale.
///
/// Error-rate axes are always logarithmic and descending: smaller error rate
/// is the more precise configuration and reads left-to-right as improving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XScale {
    ErrorRate,
    Linear,
}

/// Everything that varies between the five reports.
#[derive(Debug, Clone)]
pub struct ReportSpec {
    pub kind: ReportKind,
    pub input_file: &'static str,
    pub output_file: &'static str,
    pub columns: &'static [Column],
    pub grouping: Grouping,
    pub x: XField,
    pub y: Metric,
    pub chart: ChartSpec,
}
