use crate::rounding::round2;
use core_types::{CalculationMethod, HoldingPeriod, MonthAggregate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A value normalized to a single month of holding. Dividing by the actual
/// holding span makes figures comparable across period lengths: +1% per
/// month means the same thing on a 3-month and a 12-month hold.
pub fn per_month(value: Decimal, actual_holding_months: u32) -> Decimal {
    value / Decimal::from(actual_holding_months)
}

/// Fills each aggregate's `alpha` and `market_return` from the benchmark
/// baseline.
///
/// alpha = avg_per_month - market_per_month, rounded to 2 decimals. A month
/// missing from the baseline contributes a market figure of zero.
pub fn apply_alpha(
    aggregates: &mut BTreeMap<u32, MonthAggregate>,
    baseline: &BTreeMap<u32, Decimal>,
    period: HoldingPeriod,
    method: CalculationMethod,
) {
    let actual = method.actual_holding_months(period);
    for (month, aggregate) in aggregates.iter_mut() {
        let market = baseline.get(month).copied();
        let avg_per_month = per_month(aggregate.avg_return, actual);
        let market_per_month = market.map(|m| per_month(m, actual)).unwrap_or(Decimal::ZERO);
        aggregate.alpha = round2(avg_per_month - market_per_month);
        aggregate.market_return = round2(market.unwrap_or(Decimal::ZERO));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn aggregate(month: u32, avg_return: Decimal) -> MonthAggregate {
        MonthAggregate {
            month,
            count: 10,
            win_rate: 70,
            avg_return,
            min_return: dec!(-5.00),
            max_return: dec!(20.00),
            alpha: Decimal::ZERO,
            market_return: Decimal::ZERO,
        }
    }

    #[test]
    fn open_close_alpha_normalizes_over_period_plus_one() {
        // 3-month OpenClose hold spans 4 actual months: 9%/4 = 2.25 per
        // month against 4%/4 = 1.00 -> alpha 1.25.
        let mut aggregates = BTreeMap::from([(1, aggregate(1, dec!(9.00)))]);
        let baseline = BTreeMap::from([(1, dec!(4.00))]);
        apply_alpha(
            &mut aggregates,
            &baseline,
            HoldingPeriod::ThreeMonths,
            CalculationMethod::OpenClose,
        );
        assert_eq!(aggregates[&1].alpha, dec!(1.25));
        assert_eq!(aggregates[&1].market_return, dec!(4.00));
    }

    #[test]
    fn max_max_alpha_normalizes_over_the_nominal_period() {
        let mut aggregates = BTreeMap::from([(1, aggregate(1, dec!(9.00)))]);
        let baseline = BTreeMap::from([(1, dec!(3.00))]);
        apply_alpha(
            &mut aggregates,
            &baseline,
            HoldingPeriod::ThreeMonths,
            CalculationMethod::MaxMax,
        );
        assert_eq!(aggregates[&1].alpha, dec!(2.00));
    }

    #[test]
    fn months_missing_from_the_baseline_get_zero_market() {
        let mut aggregates = BTreeMap::from([(5, aggregate(5, dec!(6.00)))]);
        let baseline = BTreeMap::new();
        apply_alpha(
            &mut aggregates,
            &baseline,
            HoldingPeriod::SixMonths,
            CalculationMethod::MaxMax,
        );
        assert_eq!(aggregates[&5].market_return, dec!(0.00));
        assert_eq!(aggregates[&5].alpha, dec!(1.00));
    }
}
