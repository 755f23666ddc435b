use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use super::{bad_request, ApiError};
use crate::models::error::ErrorResponse;
use crate::models::price::PriceHistoryResponse;
use crate::models::search::{PriceHistoryQuery, SearchCriteria};
use crate::AppState;

/// Handler for GET /api/price-history
/// Recorded observations as returned by the history provider (not merged).
///
/// Malformed observations are dropped by the provider client. When that
/// happens the highest / lowest / average fields are recomputed from the
/// observations that remain, so the body is always self-consistent.
pub async fn get_price_history(
    State(state): State<AppState>,
    Query(query): Query<PriceHistoryQuery>,
) -> Result<Json<PriceHistoryResponse>, ApiError> {
    let criteria = SearchCriteria::from_history_query(&query)
        .map_err(|e| bad_request(e, "Missing required query parameters"))?;

    match state.history.fetch_price_history(&criteria).await {
        Ok(history) => {
            info!(
                hotel_id = criteria.hotel_id,
                count = history.price_history.len(),
                "Price history query completed"
            );
            Ok(Json(history))
        }
        Err(e) => {
            error!(hotel_id = criteria.hotel_id, error = %e, "Failed to fetch price history");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch price history")),
            ))
        }
    }
}
