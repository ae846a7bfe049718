//! Free-text stock notes.
//!
//! A note is one line: `<title words...> <amount> [<YYYY-MM-DD>]`, split on
//! whitespace. With more than two tokens the last one is always read as the
//! expiration date and the one before it as the amount. With two tokens or
//! fewer there is no date and the last token is the amount.
//!
//! The grammar has no escape: a multi-word title without a date
//! (`"Olive oil 3"`) is read as title `"Olive"`, amount `"oil"`, date `"3"`
//! and fails on the date, a title that looks like a number is taken as the
//! amount, and a lone amount (`"5"`) is stored under the empty title.

use tracing::trace;

use stockbook_core::{DateInput, ExpirationDate, LedgerError, LedgerResult, Quantity};

use crate::ledger::Ledger;

/// A note split into its three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNote {
    pub title: String,
    pub amount: Quantity,
    pub expiration_date: Option<ExpirationDate>,
}

/// Split a note into title, amount and optional expiration date.
pub fn parse_note(note: &str) -> LedgerResult<ParsedNote> {
    let mut tokens: Vec<&str> = note.split_whitespace().collect();

    let expiration_date = if tokens.len() > 2 {
        tokens.pop().map(ExpirationDate::parse).transpose()?
    } else {
        None
    };

    let raw_amount = tokens
        .pop()
        .ok_or_else(|| LedgerError::validation("note is empty"))?;
    let amount = Quantity::parse(raw_amount)?;

    let title = tokens.join(" ");

    trace!(title = %title, amount = %amount, "note parsed");

    Ok(ParsedNote {
        title,
        amount,
        expiration_date,
    })
}

impl Ledger {
    /// Parse `note` and record it as [`Ledger::add`] would.
    pub fn add_by_note(&mut self, note: &str) -> LedgerResult<()> {
        let parsed = parse_note(note)?;
        self.add(
            parsed.title,
            parsed.amount,
            parsed.expiration_date.map(DateInput::from),
        )
    }
}
