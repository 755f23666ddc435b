use serde::{Deserialize, Serialize};

use super::price::LiveRate;

/// Single hotel entry from the inventory provider's `results` array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    pub hotel_id: i64,
    pub hotel_name: String,
    pub roomtype_name: String,
    pub star_rating: f64,
    pub review_score: f64,
    pub review_count: u64,
    pub currency: String,
    pub daily_rate: f64,          // Nightly rate after discount
    pub crossed_out_rate: f64,    // Rate before discount
    pub discount_percentage: f64,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "landingURL")]
    pub landing_url: String,      // Booking page
    pub include_breakfast: bool,
    pub free_wifi: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl Hotel {
    /// Live rate for `as_of`, if the provider quoted a usable nightly price
    pub fn live_rate(&self, as_of: &str) -> Option<LiveRate> {
        LiveRate::new(self.daily_rate, as_of)
    }
}

/// Inventory provider response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelApiResponse {
    #[serde(default)]
    pub results: Vec<Hotel>,
}

impl HotelApiResponse {
    pub fn first(&self) -> Option<&Hotel> {
        self.results.first()
    }
}
