//! Exact stock quantities.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Non-negative exact decimal quantity.
///
/// Backed by `rust_decimal::Decimal`, so sums never pick up binary floating
/// point noise. The scale of the input is preserved (`"2.50"` stays `2.50`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Quantity = Quantity(Decimal::ZERO);

    /// Wrap a decimal, rejecting negative values.
    pub fn new(value: Decimal) -> LedgerResult<Self> {
        if value < Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "amount cannot be negative (got {value})"
            )));
        }
        Ok(Self(value))
    }

    /// Parse a textual amount (`"5"`, `"0.25"`).
    ///
    /// Surrounding whitespace is ignored. Input that cannot be held without
    /// rounding (more than 28 fractional digits, or beyond the decimal range)
    /// is rejected rather than approximated.
    pub fn parse(input: &str) -> LedgerResult<Self> {
        let value = Decimal::from_str_exact(input.trim())
            .map_err(|e| LedgerError::invalid_amount(input, e))?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Exact sum of quantities.
///
/// Fails instead of panicking when the total leaves the decimal range.
pub fn checked_sum(amounts: impl IntoIterator<Item = Quantity>) -> LedgerResult<Quantity> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, q| acc.checked_add(q.0))
        .map(Quantity)
        .ok_or_else(|| LedgerError::overflow("sum exceeds the exact decimal range"))
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

/// Amount as handed to the ledger: either already numeric or still text.
///
/// Conversion to a [`Quantity`] happens at the insertion boundary via
/// [`AmountInput::into_quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    Decimal(Decimal),
    Text(String),
}

impl AmountInput {
    pub fn into_quantity(self) -> LedgerResult<Quantity> {
        match self {
            AmountInput::Decimal(d) => Quantity::new(d),
            AmountInput::Text(s) => Quantity::parse(&s),
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::Decimal(value)
    }
}

impl From<Quantity> for AmountInput {
    fn from(value: Quantity) -> Self {
        AmountInput::Decimal(value.0)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

macro_rules! impl_integer_amount {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AmountInput {
                fn from(value: $t) -> Self {
                    AmountInput::Decimal(Decimal::from(value))
                }
            }
        )*
    };
}

impl_integer_amount!(i32, i64, u32, u64);
