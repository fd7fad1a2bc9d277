use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use core_types::{CalculationMethod, HoldingPeriod, MonthlyPriceRecord, ViewMode};
use rust_decimal::Decimal;
use screener::{Screener, ScreenerFilters, ScreenerReport};
use seasonality::{Heatmap, HeatmapQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct HeatmapParams {
    #[serde(default = "default_period")]
    pub period: u32,
    #[serde(default = "default_view")]
    pub view: ViewMode,
    #[serde(default = "default_method")]
    pub method: CalculationMethod,
    /// Trailing years of history; falls back to the configured window.
    pub years: Option<u32>,
}

fn default_period() -> u32 {
    3
}
fn default_view() -> ViewMode {
    ViewMode::Entry
}
fn default_method() -> CalculationMethod {
    CalculationMethod::OpenClose
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub ticker: String,
    pub period: u32,
    pub view: ViewMode,
    pub method: CalculationMethod,
    #[serde(flatten)]
    pub heatmap: Heatmap,
    pub last_updated: Option<DateTime<Utc>>,
}

/// # GET /api/heatmap/:ticker
///
/// Assembles the full seasonality view for one ticker: every simulated
/// trade, the per-month aggregates with alpha, and the robustness stats.
pub async fn get_heatmap(
    Path(ticker): Path<String>,
    Query(params): Query<HeatmapParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<HeatmapResponse>, AppError> {
    let ticker = ticker.to_uppercase();
    let period =
        HoldingPeriod::try_from(params.period).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let years_back = params.years.unwrap_or(state.config.data.years_back);

    let records = state.db_repo.get_monthly_prices(&ticker, years_back).await?;
    if records.is_empty() {
        let message = if state.db_repo.ticker_exists(&ticker).await? {
            format!("No qualifying price history for ticker {ticker}")
        } else {
            format!("Unknown ticker {ticker}")
        };
        return Err(AppError::NotFound(message));
    }
    let basket = fetch_basket(&state, years_back).await?;

    let query = HeatmapQuery {
        period,
        method: params.method,
        view: params.view,
    };
    let heatmap = state.engine.heatmap(&ticker, &records, &basket, &query)?;
    let last_updated = state.db_repo.latest_refresh(&ticker).await?;

    Ok(Json(HeatmapResponse {
        ticker,
        period: period.months(),
        view: params.view,
        method: params.method,
        heatmap,
        last_updated,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ScreenerParams {
    pub min_win_rate: Option<u32>,
    pub min_avg_per_month: Option<Decimal>,
    pub min_years: Option<usize>,
    /// Comma-separated holding periods, e.g. "1,3".
    pub periods: Option<String>,
    /// Comma-separated calendar months, e.g. "1,11,12".
    pub months: Option<String>,
    #[serde(default = "default_method")]
    pub method: CalculationMethod,
    pub limit: Option<usize>,
}

/// # GET /api/screener
///
/// Scans the tracked-ticker universe and returns the ranked seasonal
/// patterns. Omitted parameters fall back to the configured defaults.
pub async fn get_screener(
    Query(params): Query<ScreenerParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScreenerReport>, AppError> {
    let defaults = &state.config.screener;
    let periods = match &params.periods {
        Some(raw) => parse_periods(raw)?,
        None => HoldingPeriod::ALL.to_vec(),
    };
    let months = params.months.as_deref().map(parse_months).transpose()?;

    let filters = ScreenerFilters {
        min_win_rate: params.min_win_rate.unwrap_or(defaults.min_win_rate),
        min_avg_per_month: params
            .min_avg_per_month
            .unwrap_or(defaults.min_avg_per_month),
        min_years: params.min_years.unwrap_or(defaults.min_years),
        periods,
        months,
        method: params.method,
        limit: params.limit.unwrap_or(defaults.limit),
    };

    let years_back = state.config.data.years_back;
    let tickers = state.db_repo.get_tracked_tickers().await?;
    let mut universe = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        let records = state.db_repo.get_monthly_prices(&ticker, years_back).await?;
        if !records.is_empty() {
            universe.push((ticker, records));
        }
    }
    let basket = fetch_basket(&state, years_back).await?;

    let report = Screener::new(filters).run(&universe, &basket)?;
    Ok(Json(report))
}

/// Loads every benchmark member's history for the requested window.
async fn fetch_basket(
    state: &AppState,
    years_back: u32,
) -> Result<Vec<Vec<MonthlyPriceRecord>>, AppError> {
    let mut basket = Vec::with_capacity(state.config.benchmark.tickers.len());
    for member in &state.config.benchmark.tickers {
        basket.push(state.db_repo.get_monthly_prices(member, years_back).await?);
    }
    Ok(basket)
}

fn parse_periods(raw: &str) -> Result<Vec<HoldingPeriod>, AppError> {
    raw.split(',')
        .map(|part| {
            let months = part
                .trim()
                .parse::<u32>()
                .map_err(|_| AppError::BadRequest(format!("invalid holding period: {part}")))?;
            HoldingPeriod::try_from(months).map_err(|e| AppError::BadRequest(e.to_string()))
        })
        .collect()
}

fn parse_months(raw: &str) -> Result<Vec<u32>, AppError> {
    raw.split(',')
        .map(|part| {
            let month = part
                .trim()
                .parse::<u32>()
                .map_err(|_| AppError::BadRequest(format!("invalid month: {part}")))?;
            if (1..=12).contains(&month) {
                Ok(month)
            } else {
                Err(AppError::BadRequest(format!("month out of range: {month}")))
            }
        })
        .collect()
}
