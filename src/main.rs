use hotel_price_tracker::{build_router, config::AppConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hotel_price_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    if config.agoda.api_key.is_none() {
        tracing::warn!("AGODA_API_KEY is not set; hotel lookups will fail");
    }

    tracing::info!(
        production = config.production,
        agoda_url = %config.agoda.api_url,
        price_history_url = %config.price_history_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Configuration loaded"
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
