use analyzer::error::AnalyzerError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidParams(String),
    #[error("Analysis error: {0}")]
    Analyzer(#[from] AnalyzerError),
    #[error("Analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidParams(_) => StatusCode::BAD_REQUEST,
            AppError::Analyzer(AnalyzerError::DataUnavailable { .. }) => StatusCode::BAD_GATEWAY,
            AppError::Analyzer(AnalyzerError::Analytics { .. } | AnalyzerError::Simulation { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed.");
        } else {
            tracing::warn!(error = %self, "Request rejected.");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
