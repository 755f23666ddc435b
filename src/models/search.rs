//! Search criteria
//!
//! The hotel / check-in / stay length / adults tuple every endpoint is keyed
//! on. Query structs keep every field optional so a missing parameter becomes
//! our own 400 body instead of an extractor rejection.

use chrono::{Days, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_LOS: u32 = 2;
pub const DEFAULT_ADULTS: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Missing required query parameters")]
    Missing,
    #[error("Invalid query parameter '{param}': {reason}")]
    Invalid { param: &'static str, reason: &'static str },
}

/// Strict `YYYY-MM-DD` parse (zero padded, no trailing garbage)
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == s).then_some(date)
}

/// Query parameters for GET /api/hotels/{hotel_id}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelQuery {
    pub check_in: Option<String>,
    pub los: Option<String>,
    pub adults: Option<String>,
}

/// Query parameters for GET /api/price-history
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryQuery {
    pub hotel_id: Option<String>,
    pub check_in: Option<String>,
    pub los: Option<String>,
    pub adults: Option<String>,
}

/// Query parameters for GET /api/hotels/{hotel_id}/price-trend
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTrendQuery {
    pub check_in: Option<String>,
    pub los: Option<String>,     // Default: 2
    pub adults: Option<String>,  // Default: 2
    pub as_of: Option<String>,   // Default: today in the configured offset
}

/// Validated search criteria, owned by the request that built it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub hotel_id: i64,
    pub check_in: NaiveDate,
    pub los: u32,
    pub adults: u32,
    pub check_out: NaiveDate, // check_in + los
}

impl SearchCriteria {
    pub fn parse(hotel_id: &str, check_in: &str, los: &str, adults: &str) -> Result<Self, SearchError> {
        let hotel_id = hotel_id
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(SearchError::Invalid {
                param: "hotelId",
                reason: "must be a positive integer",
            })?;

        let check_in = parse_ymd(check_in.trim()).ok_or(SearchError::Invalid {
            param: "checkIn",
            reason: "must be a date in YYYY-MM-DD format",
        })?;

        let los = parse_positive(los, "los")?;
        let check_out = check_in
            .checked_add_days(Days::new(u64::from(los)))
            .ok_or(SearchError::Invalid {
                param: "los",
                reason: "stay ends outside the supported date range",
            })?;

        Ok(Self {
            hotel_id,
            check_in,
            los,
            adults: parse_positive(adults, "adults")?,
            check_out,
        })
    }

    /// Every parameter is required
    pub fn from_hotel_query(hotel_id: &str, query: &HotelQuery) -> Result<Self, SearchError> {
        match (&query.check_in, &query.los, &query.adults) {
            (Some(check_in), Some(los), Some(adults)) => Self::parse(hotel_id, check_in, los, adults),
            _ => Err(SearchError::Missing),
        }
    }

    /// Every parameter is required
    pub fn from_history_query(query: &PriceHistoryQuery) -> Result<Self, SearchError> {
        match (&query.hotel_id, &query.check_in, &query.los, &query.adults) {
            (Some(hotel_id), Some(check_in), Some(los), Some(adults)) => {
                Self::parse(hotel_id, check_in, los, adults)
            }
            _ => Err(SearchError::Missing),
        }
    }

    /// `checkIn` is required; `los` and `adults` fall back to their defaults
    pub fn from_trend_query(hotel_id: &str, query: &PriceTrendQuery) -> Result<Self, SearchError> {
        let check_in = query.check_in.as_deref().ok_or(SearchError::Missing)?;
        let los = query.los.clone().unwrap_or_else(|| DEFAULT_LOS.to_string());
        let adults = query.adults.clone().unwrap_or_else(|| DEFAULT_ADULTS.to_string());

        Self::parse(hotel_id, check_in, &los, &adults)
    }

    pub fn check_in_str(&self) -> String {
        self.check_in.format(DATE_FORMAT).to_string()
    }

    pub fn check_out_str(&self) -> String {
        self.check_out.format(DATE_FORMAT).to_string()
    }
}

fn parse_positive(value: &str, param: &'static str) -> Result<u32, SearchError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(SearchError::Invalid {
            param,
            reason: "must be a positive integer",
        })
}
