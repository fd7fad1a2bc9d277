use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to 2 decimal places, midpoint away from zero.
///
/// Every displayed figure is rounded exactly once, at the point it is first
/// produced, and never re-rounded downstream.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
