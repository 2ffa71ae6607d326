use chrono::{DateTime, Utc};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tuition::application::engine::BillingEngine;
use tuition::domain::dates::parse_date_time;
use tuition::domain::discount::{DiscountMode, DiscountSettings};
use tuition::domain::ports::{ClockBox, FamilyStore, FamilyStoreBox};
use tuition::domain::school_year::SchoolYearId;
use tuition::infrastructure::clock::{FixedClock, SystemClock};
use tuition::infrastructure::in_memory::InMemoryFamilyStore;
use tuition::interfaces::csv::statement_writer::StatementWriter;
use tuition::interfaces::json::ledger_reader::LedgerReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON ledger with school years, families and optional discount settings
    ledger: PathBuf,

    /// Only bill enrollments and payments of this school year
    #[arg(long, conflicts_with = "current_year")]
    school_year: Option<SchoolYearId>,

    /// Only bill the school year containing the reference date
    #[arg(long)]
    current_year: bool,

    /// Reference date for the recent-payment window (defaults to now)
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<DateTime<Utc>>,

    /// Course rank (from 1) the discount starts at. Overrides the ledger.
    #[arg(long)]
    discount_start_at: Option<u32>,

    /// Reduction per discounted course. Overrides the ledger.
    #[arg(long)]
    discount_step: Option<Decimal>,

    /// `fixed` or `cumulative`. Overrides the ledger.
    #[arg(long)]
    discount_mode: Option<DiscountMode>,
}

impl Cli {
    fn discount_settings(&self, base: DiscountSettings) -> tuition::error::Result<DiscountSettings> {
        DiscountSettings::new(
            self.discount_start_at.unwrap_or(base.start_at),
            self.discount_step.unwrap_or(base.step),
            self.discount_mode.unwrap_or(base.mode),
        )
    }
}

fn parse_as_of(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    parse_date_time(raw).ok_or_else(|| format!("invalid date '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let file = File::open(&cli.ledger).into_diagnostic()?;
    let ledger = LedgerReader::new(file).read().into_diagnostic()?;
    let discount = cli
        .discount_settings(ledger.discount.unwrap_or_default())
        .into_diagnostic()?;

    let clock: ClockBox = match cli.as_of {
        Some(at) => Box::new(FixedClock::new(at)),
        None => Box::new(SystemClock),
    };

    let store = InMemoryFamilyStore::new();
    for family in ledger.families {
        store.store(family).await.into_diagnostic()?;
    }
    let family_store: FamilyStoreBox = Box::new(store);

    let engine = BillingEngine::new(family_store, clock, ledger.school_years, discount);

    let target = if cli.current_year {
        match engine.current_school_year() {
            Some(year) => Some(year.id),
            None => miette::bail!("No school year contains the reference date"),
        }
    } else {
        cli.school_year
    };
    if let Some(year) = target.and_then(|id| engine.resolve_school_year(id)) {
        info!(school_year = %year.label, "Billing a single school year");
    }

    let mut statements = Vec::new();
    for (family_id, result) in engine.statements(target).await.into_diagnostic()? {
        match result {
            Ok(statement) => statements.push(statement),
            Err(e) => error!("Error computing statement for family {}: {}", family_id, e),
        }
    }

    let stdout = io::stdout();
    let mut writer = StatementWriter::new(stdout.lock());
    writer.write_statements(statements).into_diagnostic()?;

    Ok(())
}
