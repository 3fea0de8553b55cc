// Handler for POST /plot
use axum::extract::{RawForm, State};
use axum::response::{Html, IntoResponse, Response};

use super::helpers::{parse_window, resolve_as_of, PlotForm};
use super::pages;
use super::AppState;
use crate::chart::render_line_chart;
use crate::error::EngineError;

/// Renders an `EngineError` as an HTML page for browser-facing routes.
pub struct HtmlError(pub EngineError);

impl From<EngineError> for HtmlError {
    fn from(err: EngineError) -> Self {
        HtmlError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self.0, "Plot request failed");
        } else {
            tracing::warn!(error = %self.0, "Rejected plot request");
        }
        (status, Html(pages::error_page(status, &self.0.to_string()))).into_response()
    }
}

pub async fn handle_plot(State(state): State<AppState>, RawForm(body): RawForm) -> Result<Html<String>, HtmlError> {
    let form = PlotForm::from_urlencoded(&body);
    tracing::info!(
        stocks = ?form.stocks,
        historical = ?form.historical,
        as_of = ?form.as_of,
        "Received plot request"
    );

    let window = parse_window(form.historical.as_deref())?;
    let as_of = resolve_as_of(form.as_of.as_deref())?;
    let series = state.store.chart_data(&form.stocks, window, as_of)?;

    let points: usize = series.iter().map(|s| s.points.len()).sum();
    tracing::debug!(series = series.len(), points, %window, %as_of, "Rendering chart");

    let svg = render_line_chart(&series, &state.chart_options);
    Ok(Html(pages::plot_page(&svg, &form.stocks, window, as_of)))
}

