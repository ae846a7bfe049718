//! `stockbook-core` — shared building blocks for the stock ledger.
//!
//! This crate contains **pure** primitives (no IO): the error model and the
//! boundary types that turn caller input into exact quantities and dates.

pub mod date;
pub mod error;
pub mod quantity;

pub use date::{DATE_FORMAT, DateInput, ExpirationDate};
pub use error::{LedgerError, LedgerResult};
pub use quantity::{AmountInput, Quantity, checked_sum};
