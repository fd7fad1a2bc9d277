//! # Almanac Screener
//!
//! Ranks seasonal patterns across the entire tracked-ticker universe. For
//! every (ticker, entry month, holding period) combination it derives the
//! same per-month statistics the heatmap shows, applies the server-side
//! filter stages, and orders the survivors by a composite score.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate. The caller supplies the price
//!   histories; the screener never touches storage itself.
//! - **Stateless Calculation:** Each scan recomputes every row from the
//!   immutable source records, so the score can never drift out of sync with
//!   the data it ranks.

use core_types::{CalculationMethod, HoldingPeriod, MonthlyPriceRecord, ScreenerRow, ViewMode};
use rust_decimal::{Decimal, MathematicalOps};
use seasonality::{
    aggregate_by_month, benchmark_baseline, per_month, round2, simulate_returns, trimmed_mean,
    yearly_returns_by_month,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

pub mod error;

pub use error::ScreenerError;

/// The server-side filter stages, applied before scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerFilters {
    /// Minimum win rate, in whole percent.
    pub min_win_rate: u32,
    /// Minimum trimmed average return per month held, in percent.
    pub min_avg_per_month: Decimal,
    /// Minimum years of history backing a pattern.
    pub min_years: usize,
    /// Holding periods to scan.
    pub periods: Vec<HoldingPeriod>,
    /// Calendar months to keep; `None` keeps all twelve.
    pub months: Option<Vec<u32>>,
    pub method: CalculationMethod,
    /// Maximum number of rows returned, applied after ranking.
    pub limit: usize,
}

/// The ranked outcome of one screener scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenerReport {
    pub results: Vec<ScreenerRow>,
    /// Qualifying patterns before the result limit.
    pub total_patterns: usize,
    /// Distinct tickers among the qualifying patterns.
    pub total_stocks: usize,
}

/// The main screening engine.
pub struct Screener {
    filters: ScreenerFilters,
}

impl Screener {
    pub fn new(filters: ScreenerFilters) -> Self {
        Self { filters }
    }

    /// Filters, scores, and ranks every seasonal pattern in the universe.
    ///
    /// `universe` holds each tracked ticker with its price history; `basket`
    /// the benchmark members' histories. Patterns are always keyed by entry
    /// month.
    pub fn run(
        &self,
        universe: &[(String, Vec<MonthlyPriceRecord>)],
        basket: &[Vec<MonthlyPriceRecord>],
    ) -> Result<ScreenerReport, ScreenerError> {
        if universe.is_empty() {
            return Err(ScreenerError::EmptyUniverse);
        }

        let mut rows = Vec::new();
        for &period in &self.filters.periods {
            let baseline = benchmark_baseline(basket, period, self.filters.method);
            for (ticker, records) in universe {
                self.collect_rows(ticker, records, period, &baseline, &mut rows)?;
            }
        }

        rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let total_patterns = rows.len();
        let total_stocks = rows
            .iter()
            .map(|r| r.ticker.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        rows.truncate(self.filters.limit);

        tracing::debug!(
            total_patterns,
            total_stocks,
            returned = rows.len(),
            "screener scan complete"
        );

        Ok(ScreenerReport {
            results: rows,
            total_patterns,
            total_stocks,
        })
    }

    /// Derives and filters one ticker's candidate rows for one holding
    /// period, pushing the survivors onto `rows`.
    fn collect_rows(
        &self,
        ticker: &str,
        records: &[MonthlyPriceRecord],
        period: HoldingPeriod,
        baseline: &BTreeMap<u32, Decimal>,
        rows: &mut Vec<ScreenerRow>,
    ) -> Result<(), ScreenerError> {
        let cells = simulate_returns(records, period, self.filters.method, ViewMode::Entry);
        let aggregates = aggregate_by_month(&cells);
        let yearly = yearly_returns_by_month(&cells);
        let actual = self.filters.method.actual_holding_months(period);

        for (month, aggregate) in aggregates {
            if aggregate.win_rate < self.filters.min_win_rate {
                continue;
            }
            let Some(series) = yearly.get(&month) else {
                continue;
            };
            let values: Vec<Decimal> = series.iter().map(|(_, v)| *v).collect();
            // The trimmed mean is the authoritative average: it is what the
            // row displays and what the threshold compares against.
            let avg_return = trimmed_mean(&values);
            let avg_per_month = round2(per_month(avg_return, actual));
            if avg_per_month < self.filters.min_avg_per_month {
                continue;
            }
            if aggregate.count < self.filters.min_years {
                continue;
            }
            if let Some(months) = &self.filters.months {
                if !months.contains(&month) {
                    continue;
                }
            }

            // Alpha stays defined on the plain aggregate mean, matching the
            // heatmap path.
            let market = baseline.get(&month).copied().unwrap_or(Decimal::ZERO);
            let alpha = round2(per_month(aggregate.avg_return, actual) - per_month(market, actual));
            let market_per_month = round2(per_month(market, actual));
            let score = composite_score(aggregate.win_rate, avg_per_month, aggregate.count)?;

            rows.push(ScreenerRow {
                ticker: ticker.to_string(),
                entry_month: month,
                holding_period: period,
                avg_return,
                avg_per_month,
                win_rate: aggregate.win_rate,
                count: aggregate.count,
                min_return: aggregate.min_return,
                max_return: aggregate.max_return,
                alpha,
                market_per_month,
                score,
            });
        }
        Ok(())
    }
}

/// The composite ranking score: (win rate / 100) x avg per month x
/// sqrt(years).
///
/// Rewards high win rate and high average return while letting sample depth
/// contribute sub-linearly rather than dominating. Recomputed at every
/// ranking site, never persisted.
pub fn composite_score(
    win_rate: u32,
    avg_per_month: Decimal,
    count: usize,
) -> Result<Decimal, ScreenerError> {
    let depth = Decimal::from(count as u64).sqrt().ok_or_else(|| {
        ScreenerError::Calculation(format!("square root of sample count {count} failed"))
    })?;
    Ok(Decimal::from(win_rate) / Decimal::from(100) * avg_per_month * depth)
}
