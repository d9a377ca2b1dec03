use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize the report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV artifact: {0}")]
    Csv(#[from] csv::Error),
}
