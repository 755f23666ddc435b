//! Price history models
//!
//! Wire types shared by the price-history provider, the merge engine and the
//! `/api/price-history` and `/api/hotels/{id}/price-trend` endpoints.

use serde::{Deserialize, Serialize};

/// One recorded nightly price, keyed by the day it was checked (not the stay date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub checked_date: String,  // YYYY-MM-DD
    pub price_per_night: f64,
    #[serde(default)]
    pub price_per_book: f64,   // 0 when the source has no booking total
    #[serde(default)]
    pub consistent_room_ids: bool,
    #[serde(default)]
    pub has_enough_data: bool,
}

impl PriceObservation {
    /// Observation synthesized from a live inventory read.
    ///
    /// A single live read is always treated as consistent and sufficient.
    pub fn from_live(live: &LiveRate) -> Self {
        Self {
            checked_date: live.date.clone(),
            price_per_night: live.price,
            price_per_book: 0.0,
            consistent_room_ids: true,
            has_enough_data: true,
        }
    }
}

/// Highest / lowest / average over `pricePerNight`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStats {
    pub highest_price: f64,
    pub lowest_price: f64,
    pub average_price: f64,
}

impl PriceStats {
    /// Returns `None` for an empty slice so callers never see a NaN average.
    pub fn compute(observations: &[PriceObservation]) -> Option<Self> {
        if observations.is_empty() {
            return None;
        }

        let mut highest = f64::MIN;
        let mut lowest = f64::MAX;
        let mut sum = 0.0;

        for obs in observations {
            highest = highest.max(obs.price_per_night);
            lowest = lowest.min(obs.price_per_night);
            sum += obs.price_per_night;
        }

        Some(Self {
            highest_price: highest,
            lowest_price: lowest,
            average_price: sum / observations.len() as f64,
        })
    }
}

/// Chartable series: observations plus aggregates that always describe them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSeries {
    pub price_history: Vec<PriceObservation>,
    pub highest_price: Option<f64>,
    pub lowest_price: Option<f64>,
    pub average_price: Option<f64>,
}

impl PriceSeries {
    /// Build a series, recomputing aggregates from the given observations.
    ///
    /// Order is kept as given; sorting is the merge engine's job.
    pub fn from_observations(price_history: Vec<PriceObservation>) -> Self {
        let stats = PriceStats::compute(&price_history);

        Self {
            price_history,
            highest_price: stats.map(|s| s.highest_price),
            lowest_price: stats.map(|s| s.lowest_price),
            average_price: stats.map(|s| s.average_price),
        }
    }

    pub fn empty() -> Self {
        Self::from_observations(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.price_history.is_empty()
    }

    pub fn len(&self) -> usize {
        self.price_history.len()
    }

    pub fn stats(&self) -> Option<PriceStats> {
        match (self.highest_price, self.lowest_price, self.average_price) {
            (Some(highest_price), Some(lowest_price), Some(average_price)) => Some(PriceStats {
                highest_price,
                lowest_price,
                average_price,
            }),
            _ => None,
        }
    }

    pub fn contains_date(&self, date: &str) -> bool {
        self.price_history.iter().any(|p| p.checked_date == date)
    }
}

/// Current nightly rate from the inventory provider, tagged with the day it was read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveRate {
    pub price: f64,
    pub date: String, // YYYY-MM-DD
}

impl LiveRate {
    /// A zero, negative or non-finite rate means the provider had no live price.
    pub fn new(price: f64, date: impl Into<String>) -> Option<Self> {
        if !price.is_finite() || price <= 0.0 {
            return None;
        }

        Some(Self {
            price,
            date: date.into(),
        })
    }
}

/// Response body of the price-history provider (`GET /priceHistory`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub los: Option<u32>,
    #[serde(default)]
    pub highest_price: Option<f64>,
    #[serde(default)]
    pub lowest_price: Option<f64>,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub price_history: Vec<PriceObservation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<String>,
}

impl PriceHistoryResponse {
    /// The provider's own aggregates for the pre-merge series
    pub fn summary(&self) -> Option<PriceStats> {
        match (self.highest_price, self.lowest_price, self.average_price) {
            (Some(highest_price), Some(lowest_price), Some(average_price)) => Some(PriceStats {
                highest_price,
                lowest_price,
                average_price,
            }),
            _ => None,
        }
    }

    /// Observations as a series with freshly computed aggregates
    pub fn to_series(&self) -> PriceSeries {
        PriceSeries::from_observations(self.price_history.clone())
    }
}
