//! Upstream provider roles
//!
//! The inventory and history sources are reached through these traits so the
//! HTTP layer can be driven by any implementation (real clients in `agoda`
//! and `firecat`, stubs in tests).

use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

use crate::models::hotel::HotelApiResponse;
use crate::models::price::PriceHistoryResponse;
use crate::models::search::SearchCriteria;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API key is not configured on the server")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{provider} API failed with status {status}: {body}")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} API returned an unreadable body: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Status to answer with when this error ends a request.
    ///
    /// Upstream error statuses are forwarded; anything else is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProviderError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Real-time inventory source: current rate and display metadata for a hotel
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    async fn fetch_hotels(&self, criteria: &SearchCriteria) -> Result<HotelApiResponse, ProviderError>;
}

/// Recorded daily observations for a hotel and stay
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn fetch_price_history(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<PriceHistoryResponse, ProviderError>;
}
