use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{error, info};

use super::{bad_request, inventory_error, ApiError};
use crate::models::hotel::HotelApiResponse;
use crate::models::search::{HotelQuery, SearchCriteria};
use crate::AppState;

pub const MISSING_HOTEL_PARAMS: &str = "Missing required query parameters: checkIn, los, adults";

/// Handler for GET /api/hotels/{hotel_id}
/// Current rate and metadata for one hotel, straight from the inventory provider
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(query): Query<HotelQuery>,
) -> Result<Json<HotelApiResponse>, ApiError> {
    let criteria = SearchCriteria::from_hotel_query(&hotel_id, &query)
        .map_err(|e| bad_request(e, MISSING_HOTEL_PARAMS))?;

    let hotels = state.inventory.fetch_hotels(&criteria).await.map_err(|e| {
        error!(hotel_id = criteria.hotel_id, error = %e, "Failed to fetch hotel");
        inventory_error(&e)
    })?;

    info!(
        hotel_id = criteria.hotel_id,
        results = hotels.results.len(),
        "Hotel lookup completed"
    );

    Ok(Json(hotels))
}
