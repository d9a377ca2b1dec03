use crate::{AppState, error::AppError};
use analyzer::{Analyzer, AnalyzerSettings};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::NaiveDate;
use futures_util::future::join_all;
use reporter::RiskReport;
use serde::Deserialize;
use std::sync::Arc;

/// Query string of `GET /api/analyze`. Absent fields fall back to the configuration.
#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    /// Comma-separated symbols, e.g. `AAPL,BTC-USD`.
    pub tickers: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub sims: Option<usize>,
    pub horizon: Option<usize>,
    pub seed: Option<u64>,
}

/// A fully resolved and bounds-checked analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub tickers: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sims: usize,
    pub horizon: usize,
    pub seed: Option<u64>,
}

impl AnalyzeQuery {
    pub fn resolve(self, config: &configuration::Config) -> Result<AnalyzeRequest, AppError> {
        let tickers: Vec<String> = match self.tickers {
            Some(list) => list
                .split(',')
                .map(|t| t.trim().to_uppercase())
                .filter(|t| !t.is_empty())
                .collect(),
            None => config.data.tickers.clone(),
        };
        if tickers.is_empty() {
            return Err(AppError::InvalidParams("at least one ticker is required".to_string()));
        }

        let start = self.start.unwrap_or(config.data.start_date);
        let end = self.end.unwrap_or(config.data.end_date);
        if start >= end {
            return Err(AppError::InvalidParams(format!(
                "start ({start}) must be before end ({end})"
            )));
        }

        let limits = &config.server;
        let sims = self.sims.unwrap_or(config.monte_carlo.simulations);
        if sims == 0 || sims > limits.max_simulations {
            return Err(AppError::InvalidParams(format!(
                "sims must be between 1 and {}, got {sims}",
                limits.max_simulations
            )));
        }
        let horizon = self.horizon.unwrap_or(config.monte_carlo.horizon_days);
        if horizon == 0 || horizon > limits.max_horizon_days {
            return Err(AppError::InvalidParams(format!(
                "horizon must be between 1 and {}, got {horizon}",
                limits.max_horizon_days
            )));
        }

        Ok(AnalyzeRequest {
            tickers,
            start,
            end,
            sims,
            horizon,
            seed: self.seed.or(config.monte_carlo.seed),
        })
    }
}

/// # GET /api/analyze
/// Runs the full pipeline for the requested symbols and returns the report
/// document: statistics, terminal summaries and fan-chart bands per symbol.
///
/// Symbols that fail are listed under `failures`. Only when every symbol
/// fails does the first failure become the response status.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
) -> Result<Json<RiskReport>, AppError> {
    let Query(query) = query.map_err(|e| AppError::InvalidParams(e.body_text()))?;
    let request = query.resolve(&state.config)?;
    tracing::info!(tickers = ?request.tickers, sims = request.sims, horizon = request.horizon, "Dashboard analysis requested.");

    let mut settings = AnalyzerSettings::from_config(&state.config);
    settings.num_simulations = request.sims;
    settings.horizon_days = request.horizon;
    settings.seed = request.seed;
    let analyzer = Analyzer::new(settings, state.provider.clone());

    let fetches = request
        .tickers
        .iter()
        .map(|symbol| analyzer.fetch(symbol, request.start, request.end));
    let histories = join_all(fetches).await;

    // Simulation is CPU-bound; keep it off the async workers.
    let mut outcome =
        tokio::task::spawn_blocking(move || analyzer.analyze_histories(histories)).await?;

    if outcome.analyses.is_empty() && !outcome.failures.is_empty() {
        return Err(outcome.failures.remove(0).into());
    }

    Ok(Json(RiskReport::build(
        &outcome,
        request.start,
        request.end,
        request.sims,
        request.horizon,
    )))
}
