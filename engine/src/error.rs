use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::models::ParseTimeWindowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    #[error("Invalid time window selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<ParseTimeWindowError> for EngineError {
    fn from(err: ParseTimeWindowError) -> Self {
        EngineError::InvalidSelector(err.0)
    }
}

impl EngineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EngineError::UnknownSeries(_) => StatusCode::NOT_FOUND,
            EngineError::InvalidSelector(_) | EngineError::InvalidDate(_) | EngineError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            EngineError::ConfigError(_)
            | EngineError::CsvSystemError { .. }
            | EngineError::IoError { .. }
            | EngineError::CsvDataFormatError(_)
            | EngineError::AnyhowError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// JSON error body for API routes. Form routes render their own HTML page
// from the same status code (see services::web_service::pages).
impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(EngineError::UnknownSeries("TSLA".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(EngineError::InvalidSelector("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(EngineError::InvalidDate("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(EngineError::InvalidRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            EngineError::CsvDataFormatError("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let io = EngineError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_parse_time_window_error_maps_to_invalid_selector() {
        let err: EngineError = ParseTimeWindowError("forever".into()).into();
        assert!(matches!(err, EngineError::InvalidSelector(ref s) if s == "forever"));
        assert_eq!(err.to_string(), "Invalid time window selector: forever");
    }

    #[test]
    fn test_into_response_status() {
        let response = EngineError::UnknownSeries("TSLA".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
