use axum::{http::StatusCode, Json};

use crate::models::error::ErrorResponse;
use crate::models::search::SearchError;
use crate::services::providers::ProviderError;

pub mod hotel;
pub mod price_history;
pub mod price_trend;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn bad_request(err: SearchError, missing_message: &str) -> ApiError {
    let error = match err {
        SearchError::Missing => missing_message.to_string(),
        other => other.to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Generic client-facing error for a failed inventory call; details stay in the logs
pub(crate) fn inventory_error(err: &ProviderError) -> ApiError {
    let error = match err {
        ProviderError::Upstream { .. } => "Failed to fetch data from Agoda API",
        _ => "Internal Server Error",
    };
    (err.status_code(), Json(ErrorResponse::new(error)))
}
