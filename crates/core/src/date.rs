//! Calendar dates at the ledger boundary.

use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// The only accepted textual date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date after which a stock record is considered expired.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpirationDate(NaiveDate);

impl ExpirationDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse `YYYY-MM-DD`: four-digit year, two-digit month and day.
    pub fn parse(input: &str) -> LedgerResult<Self> {
        if !has_date_shape(input) {
            return Err(LedgerError::invalid_date(input, "expected YYYY-MM-DD"));
        }
        NaiveDate::parse_from_str(input, DATE_FORMAT)
            .map(Self)
            .map_err(|e| LedgerError::invalid_date(input, e))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Inclusive comparison against a report threshold.
    pub fn is_on_or_before(&self, threshold: NaiveDate) -> bool {
        self.0 <= threshold
    }
}

fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl core::fmt::Display for ExpirationDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for ExpirationDate {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for ExpirationDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// Expiration date as handed to the ledger.
///
/// Callers either already hold a date or pass the `YYYY-MM-DD` text. Both are
/// normalized to an [`ExpirationDate`] before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl DateInput {
    pub fn into_expiration_date(self) -> LedgerResult<ExpirationDate> {
        match self {
            DateInput::Date(d) => Ok(ExpirationDate(d)),
            DateInput::Text(s) => ExpirationDate::parse(&s),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<ExpirationDate> for DateInput {
    fn from(value: ExpirationDate) -> Self {
        DateInput::Date(value.0)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}
