//! Price trend handler
//!
//! GET /api/hotels/{hotel_id}/price-trend fetches the live rate and the
//! recorded history concurrently and merges them into one chartable series.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, warn};

use super::{bad_request, inventory_error, ApiError};
use crate::models::error::ErrorResponse;
use crate::models::hotel::Hotel;
use crate::models::price::PriceHistoryResponse;
use crate::models::search::{parse_ymd, PriceTrendQuery, SearchCriteria, SearchError};
use crate::models::trend::{HistoryPanel, PriceTrendResponse};
use crate::services::providers::ProviderError;
use crate::services::series_merge::merge_with_outcome;
use crate::AppState;

/// GET /api/hotels/{hotel_id}/price-trend
///
/// # Query Parameters
/// - `checkIn`: YYYY-MM-DD (required)
/// - `los`, `adults`: positive integers (default: 2)
/// - `asOf`: YYYY-MM-DD the live rate is recorded under (default: today)
///
/// # Response
/// - 200: hotel plus history panel (`ready`, `empty` or `unavailable`)
/// - 400: missing or malformed parameter
/// - 404: inventory provider has no result for the criteria
/// - 4xx/5xx: inventory provider failed
pub async fn get_price_trend(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(query): Query<PriceTrendQuery>,
) -> Result<Json<PriceTrendResponse>, ApiError> {
    let criteria = SearchCriteria::from_trend_query(&hotel_id, &query)
        .map_err(|e| bad_request(e, "Missing required query parameter: checkIn"))?;

    let as_of = match query.as_of.as_deref().map(str::trim) {
        Some(raw) => parse_ymd(raw).map(|_| raw.to_string()).ok_or_else(|| {
            let err = SearchError::Invalid {
                param: "asOf",
                reason: "must be a date in YYYY-MM-DD format",
            };
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
        })?,
        None => state.config.today(),
    };

    info!(
        hotel_id = criteria.hotel_id,
        check_in = %criteria.check_in,
        los = criteria.los,
        adults = criteria.adults,
        as_of = %as_of,
        "Fetching price trend"
    );

    // Both fetches use the same criteria value, so the pair always belongs
    // to this request.
    let (hotels, history) = tokio::join!(
        state.inventory.fetch_hotels(&criteria),
        state.history.fetch_price_history(&criteria)
    );

    let hotels = hotels.map_err(|e| {
        error!(hotel_id = criteria.hotel_id, error = %e, "Failed to fetch hotel");
        inventory_error(&e)
    })?;

    let hotel = hotels.results.into_iter().next().ok_or_else(|| {
        warn!(hotel_id = criteria.hotel_id, "No hotel found for criteria");
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("No hotel found for the given criteria")),
        )
    })?;

    let history = build_history_panel(&criteria, &hotel, history, &as_of);

    Ok(Json(PriceTrendResponse {
        hotel_id: criteria.hotel_id,
        check_in: criteria.check_in_str(),
        check_out: criteria.check_out_str(),
        los: criteria.los,
        adults: criteria.adults,
        as_of,
        hotel,
        history,
    }))
}

/// Merge the hotel's live rate into the history result, or report why not
pub fn build_history_panel(
    criteria: &SearchCriteria,
    hotel: &Hotel,
    history: Result<PriceHistoryResponse, ProviderError>,
    as_of: &str,
) -> HistoryPanel {
    let history = match history {
        Ok(history) => history,
        Err(e) => {
            error!(hotel_id = criteria.hotel_id, error = %e, "Failed to fetch price history");
            return HistoryPanel::unavailable();
        }
    };

    if !matches_criteria(&history, criteria) {
        warn!(
            hotel_id = criteria.hotel_id,
            echoed_hotel_id = ?history.hotel_id,
            echoed_check_in = ?history.check_in,
            echoed_los = ?history.los,
            "Discarding price history for different criteria"
        );
        return HistoryPanel::unavailable();
    }

    let provider_summary = history.summary();
    let outcome = merge_with_outcome(history.to_series(), hotel.live_rate(as_of), as_of);

    info!(
        hotel_id = criteria.hotel_id,
        count = outcome.series.len(),
        live_rate_applied = outcome.live_rate_applied,
        "Price series merged"
    );

    if outcome.series.is_empty() {
        return HistoryPanel::Empty;
    }

    HistoryPanel::Ready {
        series: outcome.series,
        provider_summary,
        live_rate_applied: outcome.live_rate_applied,
    }
}

/// A history response echoing other criteria belongs to another request
fn matches_criteria(history: &PriceHistoryResponse, criteria: &SearchCriteria) -> bool {
    let hotel_ok = history.hotel_id.is_none_or(|id| id == criteria.hotel_id);
    let check_in_ok = history
        .check_in
        .as_deref()
        .is_none_or(|c| parse_ymd(c) == Some(criteria.check_in));
    let los_ok = history.los.is_none_or(|los| los == criteria.los);

    hotel_ok && check_in_ok && los_ok
}
