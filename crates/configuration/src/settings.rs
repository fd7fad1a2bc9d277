use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; omitted sections and fields
/// fall back to the defaults below.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub benchmark: Benchmark,
    #[serde(default)]
    pub screener: ScreenerDefaults,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// How much history the repository queries pull in.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Trailing years of monthly prices fetched per ticker.
    pub years_back: u32,
}

impl Default for Data {
    fn default() -> Self {
        Self { years_back: 26 }
    }
}

/// The fixed broad-market basket the alpha baseline is computed from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Benchmark {
    pub tickers: Vec<String>,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            tickers: vec!["SPY".to_string(), "QQQ".to_string(), "DIA".to_string()],
        }
    }
}

/// Fallback thresholds for screener requests that omit a parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreenerDefaults {
    pub min_win_rate: u32,
    pub min_avg_per_month: Decimal,
    pub min_years: usize,
    pub limit: usize,
}

impl Default for ScreenerDefaults {
    fn default() -> Self {
        Self {
            min_win_rate: 60,
            min_avg_per_month: Decimal::new(5, 1),
            min_years: 8,
            limit: 50,
        }
    }
}
