// Handler for GET /
use axum::extract::State;
use axum::response::Html;

use super::pages;
use super::AppState;

pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    let available = state.store.available_series();
    tracing::debug!(series = available.len(), "Serving selection form");
    Html(pages::index_page(available, chrono::Local::now().date_naive()))
}
