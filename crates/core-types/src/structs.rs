use crate::enums::{HoldingPeriod, OutlierSeverity};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ticker's price aggregates for a single calendar month.
///
/// The repository guarantees at most one record per (ticker, year, month).
/// `close_max` is always present; `open_first` and `close_last` may be
/// missing for sparse months and fall back to `close_max` downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPriceRecord {
    pub ticker: String,
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    pub open_first: Option<Decimal>,
    pub close_last: Option<Decimal>,
    pub close_max: Decimal,
    pub high_max: Option<Decimal>,
    pub low_min: Option<Decimal>,
}

/// A single simulated trade: buy in one month, sell a holding period later.
///
/// Derived per request, never persisted. `month` is the calendar month the
/// cell is filed under, which depends on the requested view mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnCell {
    pub year: i32,
    pub month: u32,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    /// (exit - entry) / entry * 100, rounded to 2 decimals.
    pub return_pct: Decimal,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
}

/// Summary statistics for all simulated trades sharing one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthAggregate {
    /// Calendar month, 1-12.
    pub month: u32,
    /// Number of contributing years.
    pub count: usize,
    /// Share of positive returns, as a whole percent.
    pub win_rate: u32,
    pub avg_return: Decimal,
    pub min_return: Decimal,
    pub max_return: Decimal,
    /// Per-month outperformance versus the benchmark basket.
    pub alpha: Decimal,
    /// The benchmark basket's average return for this month.
    pub market_return: Decimal,
}

/// Flags a single year whose return distorts its month's average upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierInfo {
    pub has_outlier: bool,
    pub severity: OutlierSeverity,
    /// The largest return in the series.
    pub top_value: Decimal,
    /// The year the largest return occurred in.
    pub top_year: i32,
    /// Mean of the series with the top two values removed.
    pub avg_others: Decimal,
    /// top_value / avg_others; only meaningful when the baseline is
    /// comfortably positive.
    pub multiplier: Option<Decimal>,
    pub z_score: Decimal,
}

impl OutlierInfo {
    /// The "nothing to flag" result for series too small or too weak to judge.
    pub fn none() -> Self {
        Self {
            has_outlier: false,
            severity: OutlierSeverity::None,
            top_value: Decimal::ZERO,
            top_year: 0,
            avg_others: Decimal::ZERO,
            multiplier: None,
            z_score: Decimal::ZERO,
        }
    }
}

/// One ranked (ticker, entry month, holding period) pattern in the screener.
///
/// `score` is always derived at query time and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerRow {
    pub ticker: String,
    pub entry_month: u32,
    pub holding_period: HoldingPeriod,
    pub avg_return: Decimal,
    pub avg_per_month: Decimal,
    pub win_rate: u32,
    pub count: usize,
    pub min_return: Decimal,
    pub max_return: Decimal,
    pub alpha: Decimal,
    pub market_per_month: Decimal,
    pub score: Decimal,
}
