use crate::rounding::round2;
use chrono::{Days, Months, NaiveDate};
use core_types::{CalculationMethod, HoldingPeriod, MonthlyPriceRecord, ReturnCell, ViewMode};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Simulates one rolling trade per anchor month: buy in the anchor month,
/// sell one holding period later, and file the resulting return cell under
/// the entry or exit month depending on the view mode.
///
/// Anchors whose target month falls outside the available data, or whose
/// resolved entry price is zero, are skipped silently. Incomplete tail
/// periods are expected with live data, not an error condition.
pub fn simulate_returns(
    records: &[MonthlyPriceRecord],
    period: HoldingPeriod,
    method: CalculationMethod,
    view: ViewMode,
) -> Vec<ReturnCell> {
    let by_coord: BTreeMap<(i32, u32), &MonthlyPriceRecord> =
        records.iter().map(|r| ((r.year, r.month), r)).collect();

    let mut cells = Vec::with_capacity(records.len());
    for anchor in records {
        let (target_year, target_month) = advance(anchor.year, anchor.month, period.months());
        let Some(target) = by_coord.get(&(target_year, target_month)) else {
            continue;
        };

        let (entry_price, exit_price) = match method {
            CalculationMethod::OpenClose => (
                anchor.open_first.unwrap_or(anchor.close_max),
                target.close_last.unwrap_or(target.close_max),
            ),
            CalculationMethod::MaxMax => (anchor.close_max, target.close_max),
        };
        if entry_price.is_zero() {
            continue;
        }

        let Some(entry_date) = NaiveDate::from_ymd_opt(anchor.year, anchor.month, 1) else {
            continue;
        };
        let Some(exit_date) = last_day_of_month(target_year, target_month) else {
            continue;
        };

        let entry_price = round2(entry_price);
        let exit_price = round2(exit_price);
        let return_pct = round2((exit_price - entry_price) / entry_price * Decimal::from(100));

        // Pure relabeling: the return math above never depends on the view.
        let (year, month) = match view {
            ViewMode::Entry => (anchor.year, anchor.month),
            ViewMode::Exit => (target_year, target_month),
        };

        cells.push(ReturnCell {
            year,
            month,
            entry_price,
            exit_price,
            return_pct,
            entry_date,
            exit_date,
        });
    }
    cells
}

/// Walks `months` calendar months forward from (year, month) with year carry.
fn advance(year: i32, month: u32, months: u32) -> (i32, u32) {
    let mut year = year;
    let mut month = month + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    (year, month)
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_months(Months::new(1))?
        .checked_sub_days(Days::new(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(
        year: i32,
        month: u32,
        open_first: Option<Decimal>,
        close_last: Option<Decimal>,
        close_max: Decimal,
    ) -> MonthlyPriceRecord {
        MonthlyPriceRecord {
            ticker: "TEST".to_string(),
            year,
            month,
            open_first,
            close_last,
            close_max,
            high_max: None,
            low_min: None,
        }
    }

    #[test]
    fn open_close_uses_anchor_open_and_target_close() {
        let records = vec![
            rec(2020, 1, Some(dec!(100)), Some(dec!(102)), dec!(105)),
            rec(2020, 4, Some(dec!(107)), Some(dec!(109)), dec!(112)),
        ];
        let cells = simulate_returns(
            &records,
            HoldingPeriod::ThreeMonths,
            CalculationMethod::OpenClose,
            ViewMode::Entry,
        );
        assert_eq!(cells.len(), 1);
        let cell = &cells[0];
        assert_eq!(cell.entry_price, dec!(100));
        assert_eq!(cell.exit_price, dec!(109));
        assert_eq!(cell.return_pct, dec!(9.00));
        assert_eq!(cell.month, 1);
        assert_eq!(cell.year, 2020);
        assert_eq!(cell.entry_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(cell.exit_date, NaiveDate::from_ymd_opt(2020, 4, 30).unwrap());
    }

    #[test]
    fn max_max_uses_close_max_on_both_legs() {
        let records = vec![
            rec(2020, 1, Some(dec!(100)), Some(dec!(102)), dec!(105)),
            rec(2020, 2, Some(dec!(107)), Some(dec!(109)), dec!(126)),
        ];
        let cells = simulate_returns(
            &records,
            HoldingPeriod::OneMonth,
            CalculationMethod::MaxMax,
            ViewMode::Entry,
        );
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].entry_price, dec!(105));
        assert_eq!(cells[0].exit_price, dec!(126));
        assert_eq!(cells[0].return_pct, dec!(20.00));
    }

    #[test]
    fn missing_open_and_close_fall_back_to_close_max() {
        let records = vec![
            rec(2020, 1, None, None, dec!(50)),
            rec(2020, 4, None, None, dec!(60)),
        ];
        let cells = simulate_returns(
            &records,
            HoldingPeriod::ThreeMonths,
            CalculationMethod::OpenClose,
            ViewMode::Entry,
        );
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].entry_price, dec!(50));
        assert_eq!(cells[0].exit_price, dec!(60));
        assert_eq!(cells[0].return_pct, dec!(20.00));
    }

    #[test]
    fn anchors_without_target_records_are_skipped() {
        let records = vec![rec(2020, 1, Some(dec!(100)), Some(dec!(102)), dec!(105))];
        let cells = simulate_returns(
            &records,
            HoldingPeriod::OneMonth,
            CalculationMethod::OpenClose,
            ViewMode::Entry,
        );
        assert!(cells.is_empty());
    }

    #[test]
    fn zero_entry_price_is_skipped() {
        let records = vec![
            rec(2020, 1, Some(dec!(0)), None, dec!(0)),
            rec(2020, 2, None, None, dec!(10)),
        ];
        let cells = simulate_returns(
            &records,
            HoldingPeriod::OneMonth,
            CalculationMethod::MaxMax,
            ViewMode::Entry,
        );
        assert!(cells.is_empty());
    }

    #[test]
    fn december_anchor_carries_into_next_year() {
        let records = vec![
            rec(2020, 12, Some(dec!(100)), Some(dec!(101)), dec!(103)),
            rec(2021, 3, Some(dec!(104)), Some(dec!(110)), dec!(111)),
        ];
        let cells = simulate_returns(
            &records,
            HoldingPeriod::ThreeMonths,
            CalculationMethod::OpenClose,
            ViewMode::Entry,
        );
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].return_pct, dec!(10.00));
        assert_eq!(cells[0].exit_date, NaiveDate::from_ymd_opt(2021, 3, 31).unwrap());
    }

    #[test]
    fn exit_view_files_cells_under_the_target_month() {
        let records = vec![
            rec(2020, 11, None, None, dec!(100)),
            rec(2021, 2, None, None, dec!(110)),
        ];
        let cells = simulate_returns(
            &records,
            HoldingPeriod::ThreeMonths,
            CalculationMethod::MaxMax,
            ViewMode::Exit,
        );
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].month, 2);
        assert_eq!(cells[0].year, 2021);
    }

    #[test]
    fn return_pct_is_rounded_to_two_decimals() {
        let records = vec![
            rec(2020, 1, None, None, dec!(3)),
            rec(2020, 2, None, None, dec!(4)),
        ];
        let cells = simulate_returns(
            &records,
            HoldingPeriod::OneMonth,
            CalculationMethod::MaxMax,
            ViewMode::Entry,
        );
        assert_eq!(cells[0].return_pct, dec!(33.33));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let records = vec![
            rec(2019, 11, Some(dec!(95)), Some(dec!(97)), dec!(99)),
            rec(2020, 2, Some(dec!(101)), Some(dec!(104)), dec!(106)),
            rec(2020, 11, Some(dec!(88)), Some(dec!(90)), dec!(92)),
            rec(2021, 2, Some(dec!(95)), Some(dec!(99)), dec!(101)),
        ];
        let first = simulate_returns(
            &records,
            HoldingPeriod::ThreeMonths,
            CalculationMethod::OpenClose,
            ViewMode::Entry,
        );
        let second = simulate_returns(
            &records,
            HoldingPeriod::ThreeMonths,
            CalculationMethod::OpenClose,
            ViewMode::Entry,
        );
        assert_eq!(first, second);
    }
}
