//! Expiration reporting.

use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockbook_core::{LedgerError, LedgerResult, checked_sum};

use crate::ledger::{Ledger, StockRecord};

/// One row of the expiration report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiringStock {
    pub title: String,
    pub amount: Decimal,
}

impl ExpiringStock {
    pub fn new(title: impl Into<String>, amount: Decimal) -> Self {
        Self {
            title: title.into(),
            amount,
        }
    }
}

/// `today` shifted by `in_advance_days` (negative values move into the past).
pub fn expiration_threshold(today: NaiveDate, in_advance_days: i64) -> LedgerResult<NaiveDate> {
    let shifted = if in_advance_days >= 0 {
        today.checked_add_days(Days::new(in_advance_days.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(in_advance_days.unsigned_abs()))
    };
    shifted.ok_or_else(|| {
        LedgerError::validation(format!(
            "{in_advance_days} days from {today} is outside the supported date range"
        ))
    })
}

impl Ledger {
    /// Stock that has expired or expires within `in_advance_days` of today.
    ///
    /// Today is read from the local clock once per call. Use
    /// [`Ledger::expire_as_of`] to pin the date.
    pub fn expire(&self, in_advance_days: i64) -> LedgerResult<Vec<ExpiringStock>> {
        self.expire_as_of(Local::now().date_naive(), in_advance_days)
    }

    /// Per-title totals of dated records expiring on or before
    /// `today + in_advance_days`.
    ///
    /// - Undated records never count.
    /// - Titles whose matching total is zero are left out.
    /// - Rows follow ledger order.
    pub fn expire_as_of(
        &self,
        today: NaiveDate,
        in_advance_days: i64,
    ) -> LedgerResult<Vec<ExpiringStock>> {
        let threshold = expiration_threshold(today, in_advance_days)?;

        let mut report = Vec::new();
        for entry in self.entries() {
            let expiring = entry
                .records
                .iter()
                .filter(|r| {
                    r.expiration_date()
                        .is_some_and(|d| d.is_on_or_before(threshold))
                })
                .map(StockRecord::amount);
            let total = checked_sum(expiring)
                .map_err(|_| LedgerError::overflow(format!("expiring total of {:?}", entry.title)))?;
            if !total.is_zero() {
                report.push(ExpiringStock::new(entry.title.clone(), total.value()));
            }
        }

        debug!(%today, %threshold, rows = report.len(), "expiration report built");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use stockbook_core::DateInput;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pantry() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add("Apples", 10, Some("2024-12-30".into())).unwrap();
        ledger.add("Milk", 5, Some("2024-12-25".into())).unwrap();
        ledger.add_by_note("Bread 2 2024-12-24").unwrap();
        ledger.add_by_note("Sugar 15").unwrap();
        ledger
    }

    #[test]
    fn pantry_scenario() {
        let ledger = pantry();

        assert_eq!(ledger.find("il"), vec!["Milk"]);
        assert_eq!(ledger.amount("milk").unwrap(), dec!(5));
        assert_eq!(
            ledger.expire_as_of(ymd(2024, 12, 20), 5).unwrap(),
            vec![
                ExpiringStock::new("Milk", dec!(5)),
                ExpiringStock::new("Bread", dec!(2)),
            ]
        );
    }

    #[test]
    fn threshold_day_is_included() {
        let ledger = pantry();
        let report = ledger.expire_as_of(ymd(2024, 12, 25), 0).unwrap();
        assert_eq!(
            report,
            vec![
                ExpiringStock::new("Milk", dec!(5)),
                ExpiringStock::new("Bread", dec!(2)),
            ]
        );

        let report = ledger.expire_as_of(ymd(2024, 12, 24), 0).unwrap();
        assert_eq!(report, vec![ExpiringStock::new("Bread", dec!(2))]);
    }

    #[test]
    fn already_expired_stock_is_reported() {
        let ledger = pantry();
        let report = ledger.expire_as_of(ymd(2025, 3, 1), 0).unwrap();
        let titles: Vec<&str> = report.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Apples", "Milk", "Bread"]);
    }

    #[test]
    fn only_dated_records_of_a_title_are_summed() {
        let mut ledger = Ledger::new();
        ledger.add("Yogurt", 3, Some("2024-12-21".into())).unwrap();
        ledger.add("Yogurt", 4, None).unwrap();
        ledger.add("Yogurt", 6, Some("2025-02-01".into())).unwrap();
        ledger.add("Yogurt", "0.5", Some("2024-12-19".into())).unwrap();

        assert_eq!(
            ledger.expire_as_of(ymd(2024, 12, 20), 1).unwrap(),
            vec![ExpiringStock::new("Yogurt", dec!(3.5))]
        );
    }

    #[test]
    fn zero_totals_are_left_out() {
        let mut ledger = Ledger::new();
        ledger.add("Empty crate", 0, Some("2024-01-01".into())).unwrap();
        assert!(ledger.expire_as_of(ymd(2024, 12, 20), 0).unwrap().is_empty());
    }

    #[test]
    fn negative_window_looks_into_the_past() {
        let ledger = pantry();
        let report = ledger.expire_as_of(ymd(2024, 12, 26), -1).unwrap();
        assert_eq!(
            report,
            vec![
                ExpiringStock::new("Milk", dec!(5)),
                ExpiringStock::new("Bread", dec!(2)),
            ]
        );
        assert!(ledger.expire_as_of(ymd(2024, 12, 26), -3).unwrap().is_empty());
    }

    #[test]
    fn threshold_out_of_range_is_an_error() {
        let err = expiration_threshold(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(Ledger::new().expire_as_of(NaiveDate::MIN, -1).is_err());
    }

    #[test]
    fn oversized_expiring_total_is_an_error() {
        let mut ledger = Ledger::new();
        ledger.add("Grain", "79228162514264337593543950335", Some("2024-12-01".into())).unwrap();
        ledger.add("Grain", "1", Some("2024-12-02".into())).unwrap();

        assert!(matches!(
            ledger.expire_as_of(ymd(2024, 12, 20), 0),
            Err(LedgerError::Overflow(_))
        ));
        // Only the first record is due yet, so the total still fits.
        assert_eq!(
            ledger.expire_as_of(ymd(2024, 12, 1), 0).unwrap(),
            vec![ExpiringStock::new("Grain", Decimal::MAX)]
        );
    }

    #[test]
    fn empty_ledger_reports_nothing() {
        assert!(Ledger::new().expire(30).unwrap().is_empty());
    }

    #[test]
    fn report_rows_serialize_with_string_amounts() {
        let row = ExpiringStock::new("Milk", dec!(5));
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"title":"Milk","amount":"5"}"#
        );
    }

    fn arb_ledger() -> impl Strategy<Value = Ledger> {
        prop::collection::vec(
            (
                "[A-C]",
                0i64..1_000i64,
                prop::option::of(0u64..60u64),
            ),
            0..24,
        )
        .prop_map(|rows| {
            let base = ymd(2024, 12, 1);
            let mut ledger = Ledger::new();
            for (title, units, offset) in rows {
                let date = offset.map(|o| DateInput::from(base + Days::new(o)));
                ledger.add(title, units, date).unwrap();
            }
            ledger
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: widening the window never drops a row or shrinks a total.
        #[test]
        fn widening_the_window_is_monotonic(
            ledger in arb_ledger(),
            narrow in -10i64..40i64,
            extra in 0i64..40i64
        ) {
            let today = ymd(2024, 12, 15);
            let small = ledger.expire_as_of(today, narrow).unwrap();
            let large = ledger.expire_as_of(today, narrow + extra).unwrap();

            for row in &small {
                let wider = large.iter().find(|r| r.title == row.title);
                prop_assert!(wider.is_some_and(|w| w.amount >= row.amount));
            }
        }

        /// Property: undated stock never appears, whatever the window.
        #[test]
        fn undated_stock_never_expires(
            units in prop::collection::vec(1i64..1_000i64, 1..8),
            window in -1_000i64..10_000i64
        ) {
            let mut ledger = Ledger::new();
            for u in units {
                ledger.add("Salt", u, None).unwrap();
            }
            prop_assert!(ledger.expire_as_of(ymd(2024, 12, 15), window).unwrap().is_empty());
        }
    }
}
