use crate::returns::simulate_returns;
use core_types::{CalculationMethod, HoldingPeriod, MonthlyPriceRecord, ViewMode};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Builds the per-month market baseline from a fixed basket of broad-market
/// proxies, using the same holding period and method as the ticker query.
///
/// Every basket member's raw per-month returns are pooled into one list
/// before averaging (not average-of-averages), so a member with longer
/// history contributes proportionally more weight. Benchmark simulation is
/// always keyed by entry month. The mapping is sparse: a month with no
/// basket history has no baseline, and alpha for that month is zero
/// downstream.
pub fn benchmark_baseline(
    basket: &[Vec<MonthlyPriceRecord>],
    period: HoldingPeriod,
    method: CalculationMethod,
) -> BTreeMap<u32, Decimal> {
    let mut pooled: BTreeMap<u32, Vec<Decimal>> = BTreeMap::new();
    for member in basket {
        let cells = simulate_returns(member, period, method, ViewMode::Entry);
        for cell in cells {
            pooled.entry(cell.month).or_default().push(cell.return_pct);
        }
    }

    pooled
        .into_iter()
        .map(|(month, returns)| {
            let sum: Decimal = returns.iter().sum();
            (month, sum / Decimal::from(returns.len() as u64))
        })
        .collect()
}
