use crate::DbError;
use chrono::{DateTime, Datelike, Utc};
use core_types::MonthlyPriceRecord;
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::FromRow;

/// Row shape of the `monthly_prices` table as Postgres returns it.
///
/// The table is written by the ingestion pipeline with a primary key on
/// (ticker, year, month), so uniqueness per coordinate is guaranteed here.
#[derive(Debug, Clone, FromRow)]
struct DbMonthlyPrice {
    ticker: String,
    year: i32,
    month: i32,
    open_first: Option<Decimal>,
    close_last: Option<Decimal>,
    close_max: Decimal,
    high_max: Option<Decimal>,
    low_min: Option<Decimal>,
}

impl From<DbMonthlyPrice> for MonthlyPriceRecord {
    fn from(row: DbMonthlyPrice) -> Self {
        MonthlyPriceRecord {
            ticker: row.ticker,
            year: row.year,
            month: row.month as u32,
            open_first: row.open_first,
            close_last: row.close_last,
            close_max: row.close_max,
            high_max: row.high_max,
            low_min: row.low_min,
        }
    }
}

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches one ticker's monthly price aggregates for the trailing
    /// `years_back` years, ordered by (year, month).
    pub async fn get_monthly_prices(
        &self,
        ticker: &str,
        years_back: u32,
    ) -> Result<Vec<MonthlyPriceRecord>, DbError> {
        let cutoff = Utc::now().year() - years_back as i32;
        let rows: Vec<DbMonthlyPrice> = sqlx::query_as(
            r#"
            SELECT ticker, year, month, open_first, close_last, close_max, high_max, low_min
            FROM monthly_prices
            WHERE ticker = $1 AND year >= $2
            ORDER BY year, month
            "#,
        )
        .bind(ticker)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MonthlyPriceRecord::from).collect())
    }

    /// Fetches every ticker in the tracked universe (tier 1 and above).
    /// Tier 0 is reserved for benchmark and ad-hoc tickers, which are never
    /// screened themselves.
    pub async fn get_tracked_tickers(&self) -> Result<Vec<String>, DbError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT ticker FROM stocks WHERE tier >= 1 ORDER BY ticker")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(ticker,)| ticker).collect())
    }

    /// Whether a ticker is known to the system at all, any tier.
    pub async fn ticker_exists(&self, ticker: &str) -> Result<bool, DbError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT ticker FROM stocks WHERE ticker = $1")
            .bind(ticker)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// When the ticker's price rows were last touched by the ingestion
    /// pipeline. Feeds the heatmap's `last_updated` field.
    pub async fn latest_refresh(&self, ticker: &str) -> Result<Option<DateTime<Utc>>, DbError> {
        let row: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MAX(updated_at) FROM monthly_prices WHERE ticker = $1")
                .bind(ticker)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }
}
