// src/lib.rs

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::AppConfig;
use services::{
    agoda::AgodaService,
    firecat::FireCatService,
    providers::{HistoryProvider, InventoryProvider, ProviderError},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub inventory: Arc<dyn InventoryProvider>,
    pub history: Arc<dyn HistoryProvider>,
}

impl AppState {
    /// State backed by the real Agoda and FireCat clients
    pub fn from_config(config: AppConfig) -> Result<Self, ProviderError> {
        let inventory = AgodaService::new(config.agoda.clone(), config.upstream_timeout)?;
        let history = FireCatService::new(config.price_history_url.clone(), config.upstream_timeout)?;

        Ok(Self {
            config: Arc::new(config),
            inventory: Arc::new(inventory),
            history: Arc::new(history),
        })
    }
}

pub mod config;

pub mod services {
    pub mod agoda;
    pub mod firecat;
    pub mod providers;
    pub mod series_merge;
}

pub mod models;
pub mod handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_tracker))
        .route("/api/hotels/{hotel_id}", get(handlers::hotel::get_hotel))
        .route(
            "/api/hotels/{hotel_id}/price-trend",
            get(handlers::price_trend::get_price_trend),
        )
        .route(
            "/api/price-history",
            get(handlers::price_history::get_price_history),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hello_tracker() -> &'static str {
    "Hello from Hotel Price Tracker!"
}
