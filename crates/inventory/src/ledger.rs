use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockbook_core::{AmountInput, DateInput, ExpirationDate, LedgerError, LedgerResult, Quantity, checked_sum};

/// One quantity of a title, optionally with the day it expires.
///
/// Immutable once created. `expiration_date == None` means the stock never
/// expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    amount: Quantity,
    expiration_date: Option<ExpirationDate>,
}

impl StockRecord {
    pub fn new(amount: Quantity, expiration_date: Option<ExpirationDate>) -> Self {
        Self {
            amount,
            expiration_date,
        }
    }

    pub fn amount(&self) -> Quantity {
        self.amount
    }

    pub fn expiration_date(&self) -> Option<ExpirationDate> {
        self.expiration_date
    }
}

/// All records stored under one title, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub title: String,
    pub records: Vec<StockRecord>,
}

impl LedgerEntry {
    /// Sum of every record under this title.
    pub fn total(&self) -> LedgerResult<Decimal> {
        checked_sum(self.records.iter().map(StockRecord::amount))
            .map(|q| q.value())
            .map_err(|_| LedgerError::overflow(format!("total of {:?}", self.title)))
    }
}

/// In-memory stock ledger: title -> ordered stock records.
///
/// Titles keep the order in which they were first seen. Records under a title
/// are append-only; two insertions with the same title always produce two
/// records. Nothing is ever removed.
///
/// Titles are case-sensitive keys ("Milk" and "milk" are different entries),
/// while [`Ledger::find`] matches case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    index: HashMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `amount` of `title`, optionally expiring on `expiration_date`.
    ///
    /// The amount and the date are validated before the ledger is touched, so
    /// a failed call never creates the title.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        amount: impl Into<AmountInput>,
        expiration_date: Option<DateInput>,
    ) -> LedgerResult<()> {
        let title = title.into();
        let amount = AmountInput::into_quantity(amount.into())?;
        let expiration_date = expiration_date
            .map(DateInput::into_expiration_date)
            .transpose()?;

        debug!(
            title = %title,
            amount = %amount,
            dated = expiration_date.is_some(),
            "stock recorded"
        );

        self.push(title, StockRecord::new(amount, expiration_date));
        Ok(())
    }

    fn push(&mut self, title: String, record: StockRecord) {
        match self.index.get(&title) {
            Some(&pos) => self.entries[pos].records.push(record),
            None => {
                self.index.insert(title.clone(), self.entries.len());
                self.entries.push(LedgerEntry {
                    title,
                    records: vec![record],
                });
            }
        }
    }

    /// Titles whose lowercase form contains the lowercase `needle`.
    ///
    /// An empty needle matches every title.
    pub fn find(&self, needle: &str) -> Vec<&str> {
        self.matching(needle).map(|e| e.title.as_str()).collect()
    }

    /// Total quantity across all records of all titles matched by `needle`.
    ///
    /// Fails with [`LedgerError::Overflow`] if the total leaves the exact
    /// decimal range.
    pub fn amount(&self, needle: &str) -> LedgerResult<Decimal> {
        self.matching(needle)
            .try_fold(Decimal::ZERO, |acc, entry| {
                acc.checked_add(entry.total()?)
                    .ok_or_else(|| LedgerError::overflow(format!("total for {needle:?}")))
            })
    }

    fn matching<'a>(&'a self, needle: &str) -> impl Iterator<Item = &'a LedgerEntry> + 'a {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(move |e| e.title.to_lowercase().contains(&needle))
    }

    /// Records stored under the exact (case-sensitive) title.
    pub fn records(&self, title: &str) -> Option<&[StockRecord]> {
        self.index
            .get(title)
            .map(|&pos| self.entries[pos].records.as_slice())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Number of distinct titles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|e| e.records.len()).sum()
    }
}

impl core::fmt::Display for Ledger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for entry in &self.entries {
            for record in &entry.records {
                match record.expiration_date {
                    Some(date) => writeln!(f, "{}: {} (expires {})", entry.title, record.amount, date)?,
                    None => writeln!(f, "{}: {}", entry.title, record.amount)?,
                }
            }
        }
        Ok(())
    }
}
