//! Report driver.
//!
//! Runs one report end-to-end (locate input, parse, normalize, select,
//! render) and converts every failure mode into an [`Outcome`]. Nothing
//! propagates past a single report: a batch of reports always runs to
//! completion regardless of per-report results.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::chart;
use crate::error::ReportError;
use crate::record;
use crate::schema::{Grouping, ReportKind};
use crate::series;
use crate::table;

/// Where a report reads its table and writes its chart. Explicit
/// configuration, so reports stay independently testable and reentrant.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Overrides the default first-seen capacity for fixed-capacity reports.
    pub fixed_capacity: Option<u64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("out"),
            output_dir: PathBuf::from("out"),
            fixed_capacity: None,
        }
    }
}

/// The result of one report run. Mutually exclusive; surfaced to the
/// operator as a single diagnostic line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Succeeded {
        report: &'static str,
        output: PathBuf,
    },
    Skipped {
        report: &'static str,
        input: PathBuf,
    },
    Empty {
        report: &'static str,
    },
    Failed {
        report: &'static str,
        detail: String,
    },
}

impl Outcome {
    pub fn report(&self) -> &'static str {
        match self {
            Outcome::Succeeded { report, .. }
            | Outcome::Skipped { report, .. }
            | Outcome::Empty { report }
            | Outcome::Failed { report, .. } => report,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded { report, output } => {
                write!(f, "{report}: plot saved to {}", output.display())
            }
            Outcome::Skipped { report, input } => {
                write!(
                    f,
                    "{report}: skipped, input file '{}' not found",
                    input.display()
                )
            }
            Outcome::Empty { report } => write!(f, "{report}: no data"),
            Outcome::Failed { report, detail } => write!(f, "{report}: failed: {detail}"),
        }
    }
}

/// Run one report and report its outcome. Never panics or returns an error;
/// every failure mode maps to an [`Outcome`] variant.
pub fn run(kind: ReportKind, config: &ReportConfig) -> Outcome {
    let report = kind.name();
    match execute(kind, config) {
        Ok(output) => Outcome::Succeeded { report, output },
        Err(ReportError::MissingInput(input)) => Outcome::Skipped { report, input },
        Err(ReportError::Empty) => Outcome::Empty { report },
        Err(err) => Outcome::Failed {
            report,
            detail: err.to_string(),
        },
    }
}

/// Run every report in `kinds`, in order. Reports are independent; one
/// failing never stops the rest.
pub fn run_all(kinds: &[ReportKind], config: &ReportConfig) -> Vec<Outcome> {
    kinds.iter().map(|kind| run(*kind, config)).collect()
}

fn execute(kind: ReportKind, config: &ReportConfig) -> Result<PathBuf, ReportError> {
    let mut spec = kind.spec();
    if let Grouping::FixedCapacity { capacity } = &mut spec.grouping {
        if config.fixed_capacity.is_some() {
            *capacity = config.fixed_capacity;
        }
    }

    let input = config.input_dir.join(spec.input_file);
    let table = table::read_table(&input, spec.columns)?;
    let records = record::normalize(&table, spec.columns)?;
    debug!(report = kind.name(), records = records.len(), "normalized");

    let series = series::select(&records, &spec);
    if series.is_empty() {
        return Err(ReportError::Empty);
    }

    std::fs::create_dir_all(&config.output_dir)?;
    let output = config.output_dir.join(spec.output_file);
    chart::render(&series, &spec.chart, &output)?;
    Ok(output)
}
