// engine/src/services/web_service/mod.rs
// Router, shared state and the small handlers; the form and API handlers live in
// sibling modules.
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::chart::ChartOptions;
use crate::data::market_data::MarketDataStore;

pub mod chart_data;
pub mod helpers;
pub mod index;
pub mod pages;
pub mod plot;

/// State handed to every handler. The store is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MarketDataStore>,
    pub chart_options: Arc<ChartOptions>,
}

impl AppState {
    pub fn new(store: Arc<MarketDataStore>) -> Self {
        AppState {
            store,
            chart_options: Arc::new(ChartOptions::default()),
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::handle_index))
        .route("/plot", post(plot::handle_plot))
        .route("/api/v1/series", get(chart_data::handle_list_series))
        .route("/api/v1/chart", post(chart_data::handle_chart_data))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
