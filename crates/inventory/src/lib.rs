//! Stock ledger domain module.
//!
//! This crate contains the ledger of goods, quantities and expiration dates,
//! implemented purely as deterministic domain logic (no IO, no storage). The
//! only clock read is [`Ledger::expire`]; everything else is a pure function
//! of the ledger contents.

pub mod expiry;
pub mod ledger;
pub mod note;

pub use expiry::{ExpiringStock, expiration_threshold};
pub use ledger::{Ledger, LedgerEntry, StockRecord};
pub use note::{ParsedNote, parse_note};
