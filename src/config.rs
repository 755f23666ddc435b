//! Service configuration
//!
//! Read once at start-up from the environment (after `.env` is loaded).
//! `APP_ENV=production` switches the default upstream URLs to https; every
//! URL can still be overridden explicitly.

use chrono::{FixedOffset, Utc};
use std::time::Duration;
use thiserror::Error;

use crate::models::search::DATE_FORMAT;

const ENV_BIND_ADDR: &str = "BIND_ADDR";
const ENV_APP_ENV: &str = "APP_ENV";
const ENV_AGODA_API_KEY: &str = "AGODA_API_KEY";
const ENV_AGODA_API_URL: &str = "AGODA_API_URL";
const ENV_AGODA_CURRENCY: &str = "AGODA_CURRENCY";
const ENV_AGODA_LANGUAGE: &str = "AGODA_LANGUAGE";
const ENV_PRICE_HISTORY_API_URL: &str = "PRICE_HISTORY_API_URL";
const ENV_UPSTREAM_TIMEOUT: &str = "UPSTREAM_TIMEOUT_SECS";
const ENV_UTC_OFFSET: &str = "TRACKER_UTC_OFFSET_HOURS";

const AGODA_URL_PRODUCTION: &str = "https://affiliateapi7643.agoda.com/affiliateservice/lt_v1";
const AGODA_URL_DEVELOPMENT: &str = "http://affiliateapi7643.agoda.com/affiliateservice/lt_v1";
const PRICE_HISTORY_URL_PRODUCTION: &str = "https://api.travelwiser.me";
const PRICE_HISTORY_URL_DEVELOPMENT: &str = "http://api.travelwiser.me:28000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Inventory (Agoda affiliate) settings
#[derive(Debug, Clone)]
pub struct AgodaConfig {
    pub api_key: Option<String>, // Checked per request, not at start-up
    pub api_url: String,
    pub currency: String,
    pub language: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub production: bool,
    pub agoda: AgodaConfig,
    pub price_history_url: String,
    pub upstream_timeout: Duration,
    /// Offset used to decide what "today" is for live rates
    pub utc_offset: FixedOffset,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let production = get(ENV_APP_ENV).is_some_and(|v| v.eq_ignore_ascii_case("production"));

        let upstream_timeout = match get(ENV_UPSTREAM_TIMEOUT) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    key: ENV_UPSTREAM_TIMEOUT,
                    value: raw,
                    reason: "expected a positive number of seconds",
                })?,
            None => Duration::from_secs(10),
        };

        let utc_offset = match get(ENV_UTC_OFFSET) {
            Some(raw) => raw
                .parse::<i32>()
                .ok()
                .and_then(|hours| hours.checked_mul(3600))
                .and_then(FixedOffset::east_opt)
                .ok_or(ConfigError::Invalid {
                    key: ENV_UTC_OFFSET,
                    value: raw,
                    reason: "expected whole hours between -23 and 23",
                })?,
            // KST
            None => FixedOffset::east_opt(9 * 3600).ok_or(ConfigError::Invalid {
                key: ENV_UTC_OFFSET,
                value: "9".to_string(),
                reason: "expected whole hours between -23 and 23",
            })?,
        };

        let (default_agoda_url, default_history_url) = if production {
            (AGODA_URL_PRODUCTION, PRICE_HISTORY_URL_PRODUCTION)
        } else {
            (AGODA_URL_DEVELOPMENT, PRICE_HISTORY_URL_DEVELOPMENT)
        };

        Ok(Self {
            bind_addr: get(ENV_BIND_ADDR).unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            production,
            agoda: AgodaConfig {
                api_key: get(ENV_AGODA_API_KEY),
                api_url: get(ENV_AGODA_API_URL).unwrap_or_else(|| default_agoda_url.to_string()),
                currency: get(ENV_AGODA_CURRENCY).unwrap_or_else(|| "KRW".to_string()),
                language: get(ENV_AGODA_LANGUAGE).unwrap_or_else(|| "ko-kr".to_string()),
            },
            price_history_url: get(ENV_PRICE_HISTORY_API_URL)
                .unwrap_or_else(|| default_history_url.to_string()),
            upstream_timeout,
            utc_offset,
        })
    }

    /// Today's date (YYYY-MM-DD) in the configured offset
    pub fn today(&self) -> String {
        Utc::now()
            .with_timezone(&self.utc_offset)
            .date_naive()
            .format(DATE_FORMAT)
            .to_string()
    }
}
