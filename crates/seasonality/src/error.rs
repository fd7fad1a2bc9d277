use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeasonalityError {
    #[error("No qualifying price history for ticker: {0}")]
    NoData(String),
}
