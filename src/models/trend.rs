//! Price trend response
//!
//! Body of GET /api/hotels/{hotel_id}/price-trend: the hotel as the
//! inventory provider sees it today, plus the history panel in one of three
//! states so clients can tell "no data yet" apart from "history is down".

use serde::Serialize;

use super::hotel::Hotel;
use super::price::{PriceSeries, PriceStats};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTrendResponse {
    pub hotel_id: i64,
    pub check_in: String,
    pub check_out: String,
    pub los: u32,
    pub adults: u32,
    pub as_of: String,
    pub hotel: Hotel,
    pub history: HistoryPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum HistoryPanel {
    /// Merged series, non-empty
    Ready {
        #[serde(flatten)]
        series: PriceSeries,
        /// Provider aggregates before the live rate was merged in
        #[serde(rename = "providerSummary")]
        provider_summary: Option<PriceStats>,
        #[serde(rename = "liveRateApplied")]
        live_rate_applied: bool,
    },
    /// Valid request, nothing recorded and no live rate
    Empty,
    Unavailable {
        message: String,
    },
}

impl HistoryPanel {
    pub fn unavailable() -> Self {
        HistoryPanel::Unavailable {
            message: "Failed to fetch price history".to_string(),
        }
    }
}
