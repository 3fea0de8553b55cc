// Handlers for the JSON API: GET /api/v1/series and POST /api/v1/chart
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{SeriesData, TimeWindow};

use super::helpers::{parse_window, resolve_as_of};
use super::AppState;
use crate::error::EngineError;

#[derive(Debug, Deserialize)]
pub struct ChartDataRequest {
    #[serde(default)]
    pub series: Vec<String>,
    // Kept as raw strings so bad values surface as InvalidSelector / InvalidDate
    // instead of a generic deserialization rejection.
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub as_of: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartDataResponse {
    pub window: TimeWindow,
    pub as_of: NaiveDate,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesListResponse {
    pub series: Vec<String>,
}

pub async fn handle_list_series(State(state): State<AppState>) -> Json<SeriesListResponse> {
    Json(SeriesListResponse {
        series: state.store.available_series().to_vec(),
    })
}

pub async fn handle_chart_data(
    State(state): State<AppState>,
    payload: Result<Json<ChartDataRequest>, JsonRejection>,
) -> Result<Json<ChartDataResponse>, EngineError> {
    let Json(req) = payload.map_err(|rejection| EngineError::InvalidRequest(rejection.body_text()))?;
    tracing::info!(
        series = ?req.series,
        window = ?req.window,
        as_of = ?req.as_of,
        "Received chart data request"
    );

    let window = parse_window(req.window.as_deref())?;
    let as_of = resolve_as_of(req.as_of.as_deref())?;
    let series = state.store.chart_data(&req.series, window, as_of)?;

    Ok(Json(ChartDataResponse { window, as_of, series }))
}
