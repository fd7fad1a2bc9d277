use crate::rounding::round2;
use core_types::{MonthAggregate, ReturnCell};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// Groups return cells by calendar month (ignoring year) into per-month
/// summary statistics.
///
/// The result is sparse: months with zero cells are simply absent, keeping
/// "no data for this month" distinct from "zero return". `alpha` and
/// `market_return` start at zero and are filled in by [`crate::apply_alpha`].
pub fn aggregate_by_month(cells: &[ReturnCell]) -> BTreeMap<u32, MonthAggregate> {
    let mut grouped: BTreeMap<u32, Vec<&ReturnCell>> = BTreeMap::new();
    for cell in cells {
        grouped.entry(cell.month).or_default().push(cell);
    }

    grouped
        .into_iter()
        .map(|(month, group)| {
            let count = group.len();
            let positive = group.iter().filter(|c| c.return_pct > Decimal::ZERO).count();
            let sum: Decimal = group.iter().map(|c| c.return_pct).sum();
            let min = group.iter().map(|c| c.return_pct).min().unwrap_or_default();
            let max = group.iter().map(|c| c.return_pct).max().unwrap_or_default();

            let win_rate = (Decimal::from(positive as u64 * 100) / Decimal::from(count as u64))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or(0);

            let aggregate = MonthAggregate {
                month,
                count,
                win_rate,
                avg_return: round2(sum / Decimal::from(count as u64)),
                min_return: min,
                max_return: max,
                alpha: Decimal::ZERO,
                market_return: Decimal::ZERO,
            };
            (month, aggregate)
        })
        .collect()
}

/// Collects each month's per-year return observations, preserving the year
/// each value came from. This list feeds the outlier detector and trimmed
/// mean, which both need year attribution.
pub fn yearly_returns_by_month(cells: &[ReturnCell]) -> BTreeMap<u32, Vec<(i32, Decimal)>> {
    let mut grouped: BTreeMap<u32, Vec<(i32, Decimal)>> = BTreeMap::new();
    for cell in cells {
        grouped
            .entry(cell.month)
            .or_default()
            .push((cell.year, cell.return_pct));
    }
    grouped
}
