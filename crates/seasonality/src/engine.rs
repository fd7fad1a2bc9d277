use crate::aggregate::{aggregate_by_month, yearly_returns_by_month};
use crate::alpha::apply_alpha;
use crate::benchmark::benchmark_baseline;
use crate::error::SeasonalityError;
use crate::returns::simulate_returns;
use crate::stats::{monthly_stats, MonthStats};
use core_types::{
    CalculationMethod, HoldingPeriod, MonthAggregate, MonthlyPriceRecord, ReturnCell, ViewMode,
};
use serde::{Deserialize, Serialize};

/// Parameters for a single heatmap computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatmapQuery {
    pub period: HoldingPeriod,
    pub method: CalculationMethod,
    pub view: ViewMode,
}

/// The complete derived view for one ticker: every simulated trade, the
/// per-month summaries with alpha applied, and the robustness stats.
#[derive(Debug, Clone, Serialize)]
pub struct Heatmap {
    pub cells: Vec<ReturnCell>,
    /// Ordered by calendar month; months without data are absent.
    pub aggregates: Vec<MonthAggregate>,
    pub monthly_stats: Vec<MonthStats>,
}

/// A stateless calculator that assembles heatmaps from price records.
///
/// Every call recomputes from scratch: nothing is cached or mutated, so
/// identical inputs always produce identical outputs and concurrent queries
/// share no state.
#[derive(Debug, Default, Clone)]
pub struct SeasonalityEngine {}

impl SeasonalityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the full heatmap for one ticker.
    ///
    /// `records` is the ticker's own price history, `basket` the histories of
    /// the benchmark members. A ticker with zero qualifying rows is an error;
    /// an empty benchmark basket merely degrades alpha to the raw per-month
    /// average.
    pub fn heatmap(
        &self,
        ticker: &str,
        records: &[MonthlyPriceRecord],
        basket: &[Vec<MonthlyPriceRecord>],
        query: &HeatmapQuery,
    ) -> Result<Heatmap, SeasonalityError> {
        if records.is_empty() {
            return Err(SeasonalityError::NoData(ticker.to_string()));
        }

        let cells = simulate_returns(records, query.period, query.method, query.view);
        let mut aggregates = aggregate_by_month(&cells);

        let baseline = benchmark_baseline(basket, query.period, query.method);
        if baseline.is_empty() {
            tracing::warn!(
                ticker,
                "benchmark basket has no history; alpha degrades to the raw per-month average"
            );
        }
        apply_alpha(&mut aggregates, &baseline, query.period, query.method);

        let monthly_stats = monthly_stats(&yearly_returns_by_month(&cells));

        Ok(Heatmap {
            cells,
            aggregates: aggregates.into_values().collect(),
            monthly_stats,
        })
    }
}
