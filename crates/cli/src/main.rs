use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Local;

use stockbook_cli::{ReportConfig, build_report, ingest_notes};
use stockbook_inventory::Ledger;

fn main() -> Result<()> {
    stockbook_observability::init();

    let config = ReportConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        in_advance_days = config.in_advance_days,
        find = ?config.find,
        today = ?config.today,
        "starting stockbook"
    );

    let mut ledger = Ledger::new();
    ingest_notes(&mut ledger, io::stdin().lock())?;

    let report = build_report(&ledger, &config, Local::now().date_naive())
        .context("failed to build report")?;

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report).context("failed to write report")?;
    writeln!(out)?;
    Ok(())
}
