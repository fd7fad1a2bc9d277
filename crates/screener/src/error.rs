use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("No tracked tickers to screen")]
    EmptyUniverse,

    #[error("Calculation error: {0}")]
    Calculation(String),
}
