use analytics::AnalyticsError;
use api_client::error::ApiError;
use simulator::SimulationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Price data unavailable for {symbol}: {source}")]
    DataUnavailable {
        symbol: String,
        #[source]
        source: ApiError,
    },

    #[error("Risk analysis failed for {symbol}: {source}")]
    Analytics {
        symbol: String,
        #[source]
        source: AnalyticsError,
    },

    #[error("Simulation failed for {symbol}: {source}")]
    Simulation {
        symbol: String,
        #[source]
        source: SimulationError,
    },
}

impl AnalyzerError {
    pub fn symbol(&self) -> &str {
        match self {
            AnalyzerError::DataUnavailable { symbol, .. }
            | AnalyzerError::Analytics { symbol, .. }
            | AnalyzerError::Simulation { symbol, .. } => symbol,
        }
    }
}
