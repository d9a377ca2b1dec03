use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to complete the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The API request returned an error: {0}")]
    Upstream(String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("No price data available for {0}")]
    EmptySeries(String),

    #[error("Price data failed validation: {0}")]
    InvalidSeries(#[from] CoreError),

    #[error("Failed to access the local price store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read or write CSV price data: {0}")]
    Csv(#[from] csv::Error),
}
