//! Series selection.
//!
//! Groups and filters normalized records into the named, ordered point
//! sequences a chart draws. Callers get series pre-sorted by the report's
//! x field; the renderer draws them in point order.

use tracing::debug;

use crate::record::BenchmarkRecord;
use crate::schema::{Grouping, Metric, ReportSpec, XField};

/// One plottable line: a label plus (x, y) points in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Apply the report's grouping policy to the full record set.
///
/// Rows whose y metric is absent (the check-time sentinel) contribute no
/// point. Series that end up with no points are dropped, so an empty return
/// means the report has nothing to render.
pub fn select(records: &[BenchmarkRecord], spec: &ReportSpec) -> Vec<Series> {
    let series = match spec.grouping {
        Grouping::Single => {
            let points = points_of(records.iter(), spec.x, spec.y);
            vec![Series {
                label: spec.kind.name().to_string(),
                points,
            }]
        }
        Grouping::ByCapacity => {
            let mut capacities: Vec<u64> = Vec::new();
            for record in records {
                if !capacities.contains(&record.capacity) {
                    capacities.push(record.capacity);
                }
            }
            capacities
                .into_iter()
                .map(|capacity| Series {
                    label: format!("Capacity: {capacity}"),
                    points: points_of(
                        records.iter().filter(|r| r.capacity == capacity),
                        spec.x,
                        spec.y,
                    ),
                })
                .collect()
        }
        Grouping::FixedCapacity { capacity } => {
            let fixed = capacity.or_else(|| records.first().map(|r| r.capacity));
            match fixed {
                Some(n) => {
                    debug!(capacity = n, "fixed-capacity selection");
                    vec![Series {
                        label: format!("n = {n}"),
                        points: points_of(
                            records.iter().filter(|r| r.capacity == n),
                            spec.x,
                            spec.y,
                        ),
                    }]
                }
                None => Vec::new(),
            }
        }
    };

    series.into_iter().filter(|s| !s.points.is_empty()).collect()
}

fn points_of<'a>(
    records: impl Iterator<Item = &'a BenchmarkRecord>,
    x: XField,
    y: Metric,
) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = records
        .filter_map(|r| Some((x.value(r)?, y.value(r)?)))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ReportKind;

    fn record(capacity: u64, error_rate: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            capacity,
            error_rate,
            false_positive_rate: Some(error_rate * 100.0),
            insert_count: Some(capacity / 2),
            bit_array_size: Some(capacity * 10),
            check_time_ms: Some(1.0),
        }
    }

    #[test]
    fn single_series_sorted_by_error_rate() {
        let records = vec![record(1000, 0.1), record(1000, 0.01), record(1000, 0.05)];
        let spec = ReportKind::MemoryAggregate.spec();
        let series = select(&records, &spec);
        assert_eq!(series.len(), 1);
        let xs: Vec<f64> = series[0].points.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![0.01, 0.05, 0.1]);
    }

    #[test]
    fn capacity_grouping_is_complete_and_first_seen_ordered() {
        let records = vec![
            record(5000, 0.1),
            record(1000, 0.1),
            record(5000, 0.01),
            record(1000, 0.01),
        ];
        let spec = ReportKind::FpRateByCapacity.spec();
        let series = select(&records, &spec);

        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Capacity: 5000", "Capacity: 1000"]);

        let total: usize = series.iter().map(|s| s.points.len()).sum();
        assert_eq!(total, records.len());
        for s in &series {
            for pair in s.points.windows(2) {
                assert!(pair[0].0 <= pair[1].0);
            }
        }
    }

    #[test]
    fn fixed_capacity_defaults_to_first_seen() {
        let records = vec![record(2000, 0.1), record(9000, 0.1), record(2000, 0.01)];
        let spec = ReportKind::MemoryFixedCapacity.spec();
        let series = select(&records, &spec);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "n = 2000");
        assert_eq!(series[0].points.len(), 2);
    }

    #[test]
    fn fixed_capacity_with_no_match_is_empty() {
        let records = vec![record(2000, 0.1)];
        let mut spec = ReportKind::MemoryFixedCapacity.spec();
        spec.grouping = Grouping::FixedCapacity {
            capacity: Some(777),
        };
        assert!(select(&records, &spec).is_empty());
    }

    #[test]
    fn insert_count_is_the_sort_key_for_the_insert_report() {
        let mut a = record(1000, 0.1);
        a.insert_count = Some(900);
        let mut b = record(1000, 0.2);
        b.insert_count = Some(100);
        let spec = ReportKind::InsertCount.spec();
        let series = select(&[a, b], &spec);
        let xs: Vec<f64> = series[0].points.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![100.0, 900.0]);
    }

    #[test]
    fn rows_without_check_time_drop_their_point() {
        let mut with = record(500, 0.1);
        with.check_time_ms = Some(12.5);
        let mut without = record(500, 0.05);
        without.check_time_ms = None;
        let spec = ReportKind::CheckTime.spec();
        let series = select(&[with, without], &spec);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points, vec![(0.1, 12.5)]);
    }

    #[test]
    fn all_points_absent_means_no_series() {
        let mut r = record(500, 0.1);
        r.check_time_ms = None;
        let spec = ReportKind::CheckTime.spec();
        assert!(select(&[r], &spec).is_empty());
    }
}
