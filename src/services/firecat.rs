//! FireCat price-history client
//!
//! GET `{base}/priceHistory` returns the recorded daily observations for a
//! hotel and stay plus the provider's own aggregates. Observations are decoded
//! one at a time: an entry that breaks the data contract (missing or bad date,
//! missing, null, negative or non-finite price) is dropped here without
//! failing the rest of the body, so the merge engine only ever sees clean input.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::models::price::{PriceHistoryResponse, PriceObservation, PriceStats};
use crate::models::search::{parse_ymd, SearchCriteria};
use crate::services::providers::{HistoryProvider, ProviderError};

const PROVIDER: &str = "FireCat";

#[derive(Clone)]
pub struct FireCatService {
    client: Client,
    base_url: String,
}

impl FireCatService {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HistoryProvider for FireCatService {
    async fn fetch_price_history(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<PriceHistoryResponse, ProviderError> {
        info!(
            hotel_id = criteria.hotel_id,
            check_in = %criteria.check_in,
            los = criteria.los,
            "Fetching price history from FireCat"
        );

        let url = format!("{}/priceHistory", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[
                ("hotelId", criteria.hotel_id.to_string()),
                ("checkIn", criteria.check_in_str()),
                ("los", criteria.los.to_string()),
                ("adults", criteria.adults.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "FireCat API error");
            return Err(ProviderError::Upstream {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let raw: RawPriceHistory = response.json().await.map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        let received = raw.price_history.as_ref().map_or(0, Vec::len);
        let data = raw.into_response();

        debug!(
            hotel_id = criteria.hotel_id,
            received,
            kept = data.price_history.len(),
            elapsed = data.elapsed_time.as_deref().unwrap_or("-"),
            "FireCat response received"
        );

        Ok(data)
    }
}

/// `GET /priceHistory` body as sent, with observations left undecoded
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPriceHistory {
    hotel_id: Option<i64>,
    check_in: Option<String>,
    los: Option<u32>,
    highest_price: Option<f64>,
    lowest_price: Option<f64>,
    average_price: Option<f64>,
    price_history: Option<Vec<Value>>,
    elapsed_time: Option<String>,
}

impl RawPriceHistory {
    /// Keep the valid observations. When any entry is dropped the provider's
    /// aggregates no longer describe the list, so they are recomputed from
    /// what was kept.
    fn into_response(self) -> PriceHistoryResponse {
        let entries = self.price_history.unwrap_or_default();
        let received = entries.len();
        let price_history = sanitize_observations(entries);

        let (highest_price, lowest_price, average_price) = if price_history.len() == received {
            (self.highest_price, self.lowest_price, self.average_price)
        } else {
            let stats = PriceStats::compute(&price_history);
            warn!(
                received,
                kept = price_history.len(),
                "Recomputing price history aggregates after dropping observations"
            );
            (
                stats.map(|s| s.highest_price),
                stats.map(|s| s.lowest_price),
                stats.map(|s| s.average_price),
            )
        };

        PriceHistoryResponse {
            hotel_id: self.hotel_id,
            check_in: self.check_in,
            los: self.los,
            highest_price,
            lowest_price,
            average_price,
            price_history,
            elapsed_time: self.elapsed_time,
        }
    }
}

/// Decode each entry on its own, dropping the ones the merge engine cannot
/// order or aggregate. Arrival order is kept.
pub fn sanitize_observations(entries: Vec<Value>) -> Vec<PriceObservation> {
    entries
        .iter()
        .filter_map(|entry| {
            let observation = decode_observation(entry);
            if observation.is_none() {
                warn!(entry = %entry, "Dropping malformed price observation");
            }
            observation
        })
        .collect()
}

fn decode_observation(entry: &Value) -> Option<PriceObservation> {
    let checked_date = entry.get("checkedDate")?.as_str()?;
    parse_ymd(checked_date)?;

    let price_per_night = entry
        .get("pricePerNight")?
        .as_f64()
        .filter(|price| price.is_finite() && *price >= 0.0)?;

    let flag = |key: &str| entry.get(key).and_then(Value::as_bool).unwrap_or(false);

    Some(PriceObservation {
        checked_date: checked_date.to_string(),
        price_per_night,
        price_per_book: entry.get("pricePerBook").and_then(Value::as_f64).unwrap_or(0.0),
        consistent_room_ids: flag("consistentRoomIds"),
        has_enough_data: flag("hasEnoughData"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn entry(date: &str, price: f64) -> Value {
        json!({
            "checkedDate": date,
            "pricePerNight": price,
            "pricePerBook": 0,
            "consistentRoomIds": true,
            "hasEnoughData": true
        })
    }

    #[test]
    fn test_sanitize_keeps_valid_entries_in_arrival_order() {
        let kept = sanitize_observations(vec![
            entry("2025-09-12", 100000.0),
            entry("2025/09/11", 95000.0),
            entry("2025-09-10", -1.0),
            json!({"checkedDate": "2025-09-09", "pricePerNight": "120000"}),
            entry("2025-09-08", 0.0),
        ]);

        let dates: Vec<_> = kept.iter().map(|o| o.checked_date.as_str()).collect();
        assert_eq!(dates, vec!["2025-09-12", "2025-09-08"]);
    }

    #[test]
    fn test_sanitize_drops_null_or_missing_fields() {
        let kept = sanitize_observations(vec![
            json!({"checkedDate": "2025-09-11", "pricePerNight": null}),
            json!({"pricePerNight": 80000}),
            json!({"checkedDate": 20250912, "pricePerNight": 80000}),
            json!("2025-09-13"),
            json!({"checkedDate": "2025-09-14", "pricePerNight": 70000}),
        ]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].checked_date, "2025-09-14");
        assert_eq!(kept[0].price_per_book, 0.0);
        assert!(!kept[0].consistent_room_ids);
        assert!(!kept[0].has_enough_data);
    }

    #[test]
    fn test_one_bad_entry_does_not_fail_the_body() {
        let body = r#"{"priceHistory":[
            {"checkedDate":"2025-09-10","pricePerNight":100000},
            {"checkedDate":"2025-09-11","pricePerNight":null}
        ]}"#;

        let raw: RawPriceHistory = serde_json::from_str(body).unwrap();
        let data = raw.into_response();

        assert_eq!(data.price_history.len(), 1);
        assert_eq!(data.price_history[0].checked_date, "2025-09-10");
        assert_eq!(data.price_history[0].price_per_night, 100000.0);
    }

    #[test]
    fn test_aggregates_follow_kept_observations() {
        let body = json!({
            "hotelId": 12345,
            "highestPrice": 999999,
            "lowestPrice": 1,
            "averagePrice": 500000,
            "priceHistory": [
                entry("2025-09-12", 100000.0),
                {"checkedDate": "not-a-date", "pricePerNight": 1},
                entry("2025-09-10", 90000.0)
            ]
        });

        let raw: RawPriceHistory = serde_json::from_value(body).unwrap();
        let data = raw.into_response();
        assert_eq!(data.hotel_id, Some(12345));
        assert_eq!(data.highest_price, Some(100000.0));
        assert_eq!(data.lowest_price, Some(90000.0));
        assert_eq!(data.average_price, Some(95000.0));
    }

    #[test]
    fn test_aggregates_untouched_when_nothing_dropped() {
        let body = json!({
            "highestPrice": 120000,
            "lowestPrice": 100000,
            "averagePrice": 110000,
            "priceHistory": [entry("2025-09-12", 100000.0)]
        });

        let data = serde_json::from_value::<RawPriceHistory>(body).unwrap().into_response();
        assert_eq!(data.summary().map(|s| s.average_price), Some(110000.0));
    }

    #[test]
    fn test_null_history_is_empty() {
        let data = serde_json::from_str::<RawPriceHistory>(r#"{"priceHistory": null}"#)
            .unwrap()
            .into_response();
        assert!(data.price_history.is_empty());
        assert!(data.summary().is_none());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let service =
            FireCatService::new("http://127.0.0.1:9/".to_string(), std::time::Duration::from_secs(1))
                .unwrap();
        assert_eq!(service.base_url, "http://127.0.0.1:9");
    }
}
