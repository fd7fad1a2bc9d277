use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use screener::ScreenerError;
use seasonality::SeasonalityError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Seasonality error: {0}")]
    Seasonality(#[from] SeasonalityError),
    #[error("Screener error: {0}")]
    Screener(#[from] ScreenerError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Seasonality(SeasonalityError::NoData(ticker)) => (
                StatusCode::NOT_FOUND,
                format!("No qualifying price history for ticker {ticker}"),
            ),
            AppError::Screener(ScreenerError::EmptyUniverse) => (
                StatusCode::NOT_FOUND,
                "No tracked tickers to screen".to_string(),
            ),
            AppError::Screener(screener_err) => {
                tracing::error!(error = ?screener_err, "Screener error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred during screening".to_string(),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
