use bloom_report::report::{run, ReportConfig};
use bloom_report::schema::ReportKind;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bloom-report")]
#[command(about = "Render comparison charts from Bloom filter benchmark results")]
#[command(version)]
struct Cli {
    /// Reports to run (default: all of them)
    #[arg(value_enum)]
    reports: Vec<ReportKind>,

    /// Directory containing the benchmark CSV tables
    #[arg(long, short = 'i', default_value = "out")]
    input_dir: PathBuf,

    /// Directory the rendered charts are written to
    #[arg(long, short = 'o', default_value = "out")]
    output_dir: PathBuf,

    /// Capacity to select for fixed-capacity reports
    /// (default: first capacity in the input file)
    #[arg(long)]
    capacity: Option<u64>,

    /// Batch summary format
    #[arg(long, value_enum, default_value = "table")]
    format: SummaryFormat,

    /// List the known reports and their files, then exit
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum SummaryFormat {
    #[default]
    Table,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    if cli.list {
        for kind in ReportKind::all() {
            let spec = kind.spec();
            println!(
                "{:<24} {:<28} -> {}",
                kind.name(),
                spec.input_file,
                spec.output_file
            );
        }
        return Ok(());
    }

    let kinds = if cli.reports.is_empty() {
        ReportKind::all()
    } else {
        cli.reports.clone()
    };

    let config = ReportConfig {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir,
        fixed_capacity: cli.capacity,
    };

    // One report failing never stops the rest; the process always
    // completes normally.
    let mut outcomes = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let outcome = run(kind, &config);
        if cli.format == SummaryFormat::Table {
            println!("{outcome}");
        }
        outcomes.push(outcome);
    }

    if cli.format == SummaryFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();
}
