// Request parsing shared by the plot and chart-data handlers.
use crate::error::EngineError;
use chrono::NaiveDate;
use shared::models::TimeWindow;
use shared::utils::parse_date;

/// Fields of the `/plot` form. `stocks` repeats once per checked box, which
/// serde_urlencoded can't collect into a Vec, so the body is walked by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotForm {
    pub stocks: Vec<String>,
    pub historical: Option<String>,
    pub as_of: Option<String>,
}

impl PlotForm {
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut form = PlotForm::default();
        for (key, value) in form_urlencoded::parse(body) {
            match key.as_ref() {
                "stocks" => form.stocks.push(value.into_owned()),
                "historical" => form.historical = Some(value.into_owned()),
                "as_of" => form.as_of = Some(value.into_owned()),
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }
        form
    }
}

pub fn parse_window(selector: Option<&str>) -> Result<TimeWindow, EngineError> {
    Ok(TimeWindow::parse_optional(selector)?)
}

/// Reference date for window filtering: `as_of` if given, otherwise today's local date.
pub fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate, EngineError> {
    match as_of.map(str::trim) {
        None | Some("") => Ok(chrono::Local::now().date_naive()),
        Some(s) => parse_date(s).ok_or_else(|| EngineError::InvalidDate(s.to_string())),
    }
}
