// Stock viewer entry point: load (or generate) the price table once, then serve it.
use anyhow::Context;
use engine::config::settings::EngineSettings;
use engine::data::csv_store::PriceCsvStore;
use engine::data::market_data::MarketDataStore;
use engine::services::{build_router, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockview=info,engine=info,tower_http=info".into()),
        )
        .init();

    info!("Starting Stock Viewer v{}...", env!("CARGO_PKG_VERSION"));

    let settings = EngineSettings::load().context("Failed to load settings")?;

    // The table is built once here and only read afterwards.
    let table = PriceCsvStore::load_or_generate(&settings.data_path, &settings.dataset)
        .with_context(|| format!("Failed to load price data from '{}'", settings.data_path.display()))?;
    info!(
        rows = table.len(),
        series = table.columns().len(),
        path = %settings.data_path.display(),
        "Price table ready"
    );

    let state = AppState::new(Arc::new(MarketDataStore::new(table)));
    let app = build_router(state);

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Stock Viewer listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
