//! Report configuration read from the environment.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use stockbook_core::ExpirationDate;

pub const ENV_IN_ADVANCE_DAYS: &str = "STOCKBOOK_IN_ADVANCE_DAYS";
pub const ENV_FIND: &str = "STOCKBOOK_FIND";
pub const ENV_TODAY: &str = "STOCKBOOK_TODAY";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportConfig {
    /// Expiration window in days (may be negative).
    pub in_advance_days: i64,
    /// Needle for the search/amount section, if any.
    pub find: Option<String>,
    /// Pinned business date; `None` means the local clock.
    pub today: Option<NaiveDate>,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let in_advance_days = match lookup(ENV_IN_ADVANCE_DAYS) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{ENV_IN_ADVANCE_DAYS} must be an integer, got {raw:?}"))?,
            None => 0,
        };

        let find = lookup(ENV_FIND);

        let today = lookup(ENV_TODAY)
            .map(|raw| {
                ExpirationDate::parse(raw.trim())
                    .map(|d| d.date())
                    .with_context(|| format!("{ENV_TODAY} must be YYYY-MM-DD"))
            })
            .transpose()?;

        Ok(Self {
            in_advance_days,
            find,
            today,
        })
    }
}
