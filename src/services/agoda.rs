//! Agoda affiliate inventory client
//!
//! POSTs a long-tail search (`lt_v1`) for a single hotel and returns its
//! current rate with display metadata.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::AgodaConfig;
use crate::models::hotel::HotelApiResponse;
use crate::models::search::SearchCriteria;
use crate::services::providers::{InventoryProvider, ProviderError};

const PROVIDER: &str = "Agoda";

#[derive(Clone)]
pub struct AgodaService {
    client: Client,
    config: AgodaConfig,
}

// lt_v1 request body
#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest {
    criteria: Criteria,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Criteria {
    additional: Additional,
    check_in_date: String,
    check_out_date: String,
    hotel_id: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Additional {
    currency: String,
    discount_only: bool,
    language: String,
    occupancy: Occupancy,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Occupancy {
    number_of_adult: u32,
    number_of_children: u32,
}

impl AgodaService {
    pub fn new(config: AgodaConfig, timeout: std::time::Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            config,
        })
    }

    pub(crate) fn build_request(&self, criteria: &SearchCriteria) -> SearchRequest {
        SearchRequest {
            criteria: Criteria {
                additional: Additional {
                    currency: self.config.currency.clone(),
                    discount_only: false,
                    language: self.config.language.clone(),
                    occupancy: Occupancy {
                        number_of_adult: criteria.adults,
                        number_of_children: 0,
                    },
                },
                check_in_date: criteria.check_in_str(),
                check_out_date: criteria.check_out_str(),
                hotel_id: vec![criteria.hotel_id],
            },
        }
    }
}

#[async_trait]
impl InventoryProvider for AgodaService {
    async fn fetch_hotels(&self, criteria: &SearchCriteria) -> Result<HotelApiResponse, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey)?;

        info!(
            hotel_id = criteria.hotel_id,
            check_in = %criteria.check_in,
            los = criteria.los,
            adults = criteria.adults,
            "Fetching hotel rate from Agoda"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header(header::AUTHORIZATION, api_key)
            .json(&self.build_request(criteria))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Agoda API error");
            return Err(ProviderError::Upstream {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let data: HotelApiResponse = response.json().await.map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        debug!(
            hotel_id = criteria.hotel_id,
            results = data.results.len(),
            daily_rate = data.first().map(|h| h.daily_rate),
            "Agoda response received"
        );

        Ok(data)
    }
}
