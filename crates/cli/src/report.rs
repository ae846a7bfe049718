//! Note ingestion and the printed report.

use std::io::BufRead;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use stockbook_core::LedgerResult;
use stockbook_inventory::{ExpiringStock, Ledger, LedgerEntry, expiration_threshold};

use crate::config::ReportConfig;

/// Outcome of feeding notes into a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IngestSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Record every note line from `reader`.
///
/// Blank lines and lines starting with `#` are skipped. A note that fails to
/// parse is logged and counted; later lines are still read.
pub fn ingest_notes(ledger: &mut Ledger, reader: impl BufRead) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("failed to read note on line {line_no}"))?;
        let note = line.trim();
        if note.is_empty() || note.starts_with('#') {
            continue;
        }

        match ledger.add_by_note(note) {
            Ok(()) => summary.accepted += 1,
            Err(err) => {
                warn!(line = line_no, note, error = %err, "note rejected");
                summary.rejected += 1;
            }
        }
    }

    info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        "notes ingested"
    );
    Ok(summary)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindSection {
    pub needle: String,
    pub titles: Vec<String>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpireSection {
    pub today: NaiveDate,
    pub in_advance_days: i64,
    pub threshold: NaiveDate,
    pub items: Vec<ExpiringStock>,
}

/// Everything the binary prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub stock: Vec<LedgerEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub find: Option<FindSection>,
    pub expire: ExpireSection,
}

/// Build the report. `today` is used unless the config pins a date.
pub fn build_report(ledger: &Ledger, config: &ReportConfig, today: NaiveDate) -> LedgerResult<Report> {
    let today = config.today.unwrap_or(today);

    let find = config
        .find
        .as_ref()
        .map(|needle| -> LedgerResult<FindSection> {
            Ok(FindSection {
                needle: needle.clone(),
                titles: ledger.find(needle).into_iter().map(str::to_string).collect(),
                amount: ledger.amount(needle)?,
            })
        })
        .transpose()?;

    let expire = ExpireSection {
        today,
        in_advance_days: config.in_advance_days,
        threshold: expiration_threshold(today, config.in_advance_days)?,
        items: ledger.expire_as_of(today, config.in_advance_days)?,
    };

    Ok(Report {
        stock: ledger.entries().to_vec(),
        find,
        expire,
    })
}
