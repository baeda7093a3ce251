//! Ledgerline batch checker
//!
//! Validates a journal-voucher batch read from a JSON file and prints the
//! report on stdout.
//!
//! Usage: ledgerline-check batch.json [--rows] [--summary]
//!
//! Exit status: 0 when the batch may be submitted, 1 when it is rejected,
//! 2 when the input or configuration cannot be read.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerline_core::adapter::RowAdapter;
use ledgerline_core::voucher::{
    EntryRecord, GroupSummary, ValidationOptions, ValidationReport, summarize_groups,
    validate_batch,
};
use ledgerline_shared::{AppConfig, AppError, AppResult, LoggingConfig, ValidationConfig};

/// Validate a journal-voucher batch before submission.
#[derive(Debug, Parser)]
#[command(name = "ledgerline-check", version, about)]
struct Cli {
    /// JSON file holding the batch.
    file: PathBuf,

    /// Read `{ "headers": [...], "rows": [[...]] }` instead of entry records.
    #[arg(long)]
    rows: bool,

    /// Maximum entries per serial number.
    #[arg(long)]
    max_entries: Option<usize>,

    /// Allowed debit/credit difference per serial number.
    #[arg(long)]
    tolerance: Option<Decimal>,

    /// Do not check entry counts.
    #[arg(long)]
    skip_entry_limit: bool,

    /// Do not check debit/credit balance.
    #[arg(long)]
    skip_balance: bool,

    /// Do not check document and posting dates.
    #[arg(long)]
    skip_date_consistency: bool,

    /// Include per-group totals in the output.
    #[arg(long)]
    summary: bool,
}

impl Cli {
    /// Configured defaults with command-line overrides applied.
    fn options(&self, config: &ValidationConfig) -> ValidationOptions {
        let mut options = ValidationOptions::from(config);
        if let Some(max_entries) = self.max_entries {
            options.max_entries = max_entries;
        }
        if let Some(tolerance) = self.tolerance {
            options.tolerance = tolerance;
        }
        options.check_entry_limit &= !self.skip_entry_limit;
        options.check_balance &= !self.skip_balance;
        options.check_date_consistency &= !self.skip_date_consistency;
        options
    }
}

/// Tabular upload as produced by a spreadsheet reader.
#[derive(Debug, Deserialize)]
struct RowsFile {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct Output<'a> {
    report: &'a ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<GroupSummary>>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let code = err.downcast_ref::<AppError>().map_or(2, AppError::exit_code);
            eprintln!("Error: {err:#}");
            ExitCode::from(code)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load().map_err(AppError::from)?;

    init_tracing(&config.logging);

    let entries = read_batch(&cli.file, cli.rows)?;
    let options = cli.options(&config.validation);
    info!(
        file = %cli.file.display(),
        entries = entries.len(),
        max_entries = options.max_entries,
        tolerance = %options.tolerance,
        "Validating batch"
    );

    let report = validate_batch(&entries, &options);
    let groups = cli
        .summary
        .then(|| summarize_groups(&entries, options.tolerance));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(
        &mut out,
        &Output {
            report: &report,
            groups,
        },
    )
    .context("Failed to write report")?;
    std::io::Write::write_all(&mut out, b"\n").context("Failed to write report")?;

    Ok(ExitCode::from(report_exit_code(report)))
}

/// Exit status for a finished report: 0 when the batch may be submitted.
fn report_exit_code(report: ValidationReport) -> u8 {
    match report.into_result() {
        Ok(()) => {
            info!("Batch passed validation");
            0
        }
        Err(rejected) => {
            warn!(codes = ?rejected.error_codes(), "Batch rejected");
            AppError::from(rejected).exit_code()
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_batch(path: &Path, rows: bool) -> AppResult<Vec<EntryRecord>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| AppError::Io(format!("{}: {err}", path.display())))?;

    if !rows {
        return serde_json::from_str(&raw).map_err(|err| AppError::InvalidInput(err.to_string()));
    }

    let file: RowsFile =
        serde_json::from_str(&raw).map_err(|err| AppError::InvalidInput(err.to_string()))?;
    let adapter = RowAdapter::from_headers(&file.headers)?;
    let cells: Vec<Vec<String>> = file
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    Ok(adapter.adapt_rows::<_, String>(&cells))
}

/// Spreadsheet readers emit numbers for numeric cells (amounts, serial
/// numbers, date serials); the adapter works on text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
