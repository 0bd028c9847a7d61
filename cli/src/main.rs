//! CarePulse: triage CLI
//!
//! Scores patient conversations, shows the ranked patient list under the
//! operator's current thresholds, and books follow-up appointments.
//!
//! Usage:
//!   cargo run -p carepulse -- analyze --input conversations.json
//!   cargo run -p carepulse -- view --filter high --page 2
//!   cargo run -p carepulse -- thresholds --high 20 --medium 10
//!   cargo run -p carepulse -- schedule P001

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use carepulse_contracts::{
    error::{CarePulseError, CarePulseResult},
    policy::ThresholdUpdate,
    view::{RiskFilter, ViewPage, ViewQuery},
};
use carepulse_core::{
    booking::book_follow_up,
    ingest::{ingest, preview, summarize},
    policy_or_default, ViewAssembler,
};
use carepulse_policy::ThresholdStore;
use carepulse_ref::{mock_data::sample_conversations, LexiconSentiment, MockCalendar};
use carepulse_store::{load_conversations, JsonLedgerStore, RecordStore};

const RECORDS_FILE: &str = "processed_patients.json";
const THRESHOLDS_FILE: &str = "thresholds.toml";
const LEDGER_FILE: &str = "schedule.json";

// ── CLI definition ────────────────────────────────────────────────────────────

/// CarePulse: conversation triage and follow-up scheduling.
#[derive(Parser)]
#[command(
    name = "carepulse",
    about = "CarePulse patient triage CLI",
    long_about = "Scores free-text patient conversations for clinical urgency,\n\
                  ranks patients under operator-configured thresholds, and\n\
                  books follow-up appointments."
)]
struct Cli {
    /// Directory holding processed records, thresholds, and the schedule ledger.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a conversation batch and save the processed records.
    Analyze {
        /// JSON array of conversations. Uses the built-in sample batch when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Show one page of the ranked patient list.
    View {
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// all, high, medium or low.
        #[arg(long, default_value = "all")]
        filter: RiskFilter,
        /// Print the page as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show the threshold policy, updating any values given.
    Thresholds {
        #[arg(long)]
        high: Option<f64>,
        #[arg(long)]
        medium: Option<f64>,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Book a follow-up appointment for a patient.
    Schedule {
        patient_id: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-record detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let paths = DataPaths::new(&cli.data_dir);

    let result = match cli.command {
        Command::Analyze { input } => run_analyze(&paths, input.as_deref()),
        Command::View { page, filter, json } => run_view(&paths, page, filter, json),
        Command::Thresholds { high, medium, page_size } => run_thresholds(
            &paths,
            ThresholdUpdate {
                high_threshold: high,
                medium_threshold: medium,
                page_size,
            },
        ),
        Command::Schedule { patient_id } => run_schedule(&paths, &patient_id),
    };

    if let Err(e) = result {
        eprintln!("carepulse error: {}", e);
        std::process::exit(1);
    }
}

struct DataPaths {
    records: PathBuf,
    thresholds: PathBuf,
    ledger: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        Self {
            records: data_dir.join(RECORDS_FILE),
            thresholds: data_dir.join(THRESHOLDS_FILE),
            ledger: data_dir.join(LEDGER_FILE),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_analyze(paths: &DataPaths, input: Option<&Path>) -> CarePulseResult<()> {
    let rows = match input {
        Some(path) => load_conversations(path)?,
        None => {
            info!("no input given; using the built-in sample conversations");
            sample_conversations()
        }
    };
    if rows.is_empty() {
        println!("No conversations loaded.");
        return Ok(());
    }

    println!("Analyzing {} conversations...", rows.len());
    let records = ingest(rows, &LexiconSentiment::new());
    let summary = summarize(&records);

    println!();
    println!("Risk distribution (extraction-time):");
    println!("  High:   {}", summary.distribution.high_risk);
    println!("  Medium: {}", summary.distribution.medium_risk);
    println!("  Low:    {}", summary.distribution.low_risk);

    if !summary.top_high_risk.is_empty() {
        println!();
        println!("Top {} high-risk patients:", summary.top_high_risk.len());
        for record in &summary.top_high_risk {
            println!(
                "  {} | score {:.1} | {}",
                record.patient_id,
                record.risk_score,
                record.symptoms.join(", ")
            );
            if let Some(text) = &record.conversation {
                println!("    \"{}...\"", preview(text, 100));
            }
        }
    }

    RecordStore::new(&paths.records).save(&records)?;
    println!();
    println!("Results saved to {}", paths.records.display());
    Ok(())
}

fn run_view(paths: &DataPaths, page: usize, filter: RiskFilter, json: bool) -> CarePulseResult<()> {
    let records = RecordStore::new(&paths.records).load()?;
    let assembler = ViewAssembler::new(
        Box::new(ThresholdStore::new(&paths.thresholds)),
        Box::new(JsonLedgerStore::new(&paths.ledger)),
    );
    let view = assembler.render(&records, &ViewQuery { page, risk_filter: filter }, Utc::now());

    if json {
        let rendered = serde_json::to_string_pretty(&view).map_err(|e| CarePulseError::StorageError {
            reason: format!("failed to serialize view: {}", e),
        })?;
        println!("{}", rendered);
    } else {
        print_view(&view);
    }
    Ok(())
}

fn run_thresholds(paths: &DataPaths, update: ThresholdUpdate) -> CarePulseResult<()> {
    let store = ThresholdStore::new(&paths.thresholds);
    let policy = if update.is_empty() {
        store.read()?
    } else {
        store.update(&update)?
    };

    println!("Threshold policy ({}):", store.path().display());
    println!("  high_threshold   = {}", policy.high_threshold);
    println!("  medium_threshold = {}", policy.medium_threshold);
    println!("  page_size        = {}", policy.page_size);
    if !policy.is_ordered() {
        println!("  note: high_threshold <= medium_threshold, so no patient will be Medium");
    }
    Ok(())
}

fn run_schedule(paths: &DataPaths, patient_id: &str) -> CarePulseResult<()> {
    let records = RecordStore::new(&paths.records).load()?;
    let policy = policy_or_default(&ThresholdStore::new(&paths.thresholds));
    let ledger = JsonLedgerStore::new(&paths.ledger);
    let calendar = MockCalendar::new();

    let appointment = book_follow_up(patient_id, &records, &policy, &calendar, &ledger)?;

    println!("[{}] {} booked for {}", appointment.priority, appointment.patient_id, appointment.scheduled_at);
    println!("  risk:   {}", appointment.risk_category);
    println!("  reason: {}", appointment.reason);
    println!("  status: {}", appointment.status);
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_view(view: &ViewPage) {
    let stats = &view.stats;
    println!(
        "Patients: {} total | {} high | {} medium | {} low",
        stats.total, stats.high_risk, stats.medium_risk, stats.low_risk
    );
    println!(
        "Filter: {} | page {} of {}",
        view.current_filter, view.current_page, view.total_pages
    );
    println!();

    if view.patients.is_empty() {
        println!("  (no patients on this page)");
        return;
    }

    println!("  {:<10} {:>6}  {:<7} {:<10} {}", "ID", "SCORE", "RISK", "STATUS", "SYMPTOMS");
    for patient in &view.patients {
        let record = &patient.record;
        println!(
            "  {:<10} {:>6.1}  {:<7} {:<10} {}",
            record.patient_id,
            record.risk_score,
            patient.risk_category.as_str(),
            patient.status.to_string(),
            record.symptoms.join(", ")
        );
    }
}
