use crate::error::AnalyzerError;
use analytics::{EngineSettings, RiskMetricsEngine, RiskStatistics};
use api_client::PriceSeriesProvider;
use chrono::NaiveDate;
use configuration::Config;
use core_types::PriceSeries;
use futures::future::join_all;
use simulator::{MonteCarloSimulator, SimulationParams, SimulationResult, SimulationSummary};
use std::sync::Arc;

pub mod error;
pub mod provider;

pub use provider::provider_from_config;

/// Everything one analysis run needs besides the price data.
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub engine: EngineSettings,
    pub horizon_days: usize,
    pub num_simulations: usize,
    /// Base seed; symbol `i` of a batch is simulated with `seed + i`.
    pub seed: Option<u64>,
}

impl AnalyzerSettings {
    pub fn from_config(config: &Config) -> Self {
        let analysis = &config.analysis;
        Self {
            engine: EngineSettings {
                return_kind: analysis.return_kind,
                risk_free_rate: analysis.risk_free_rate,
                confidence: analysis.confidence,
                trading_days_equity: analysis.trading_days_stock,
                trading_days_crypto: analysis.trading_days_crypto,
            },
            horizon_days: config.monte_carlo.horizon_days,
            num_simulations: config.monte_carlo.simulations,
            seed: config.monte_carlo.seed,
        }
    }
}

/// The historical statistics and forward simulation of one symbol.
#[derive(Debug, Clone)]
pub struct AssetAnalysis {
    pub series: PriceSeries,
    pub statistics: RiskStatistics,
    pub simulation: SimulationResult,
    pub summary: SimulationSummary,
}

impl AssetAnalysis {
    pub fn symbol(&self) -> &str {
        &self.statistics.symbol
    }
}

/// The outcome of analyzing a batch of symbols.
///
/// Failures are collected rather than aborting the batch; the caller decides
/// whether a failed symbol is skipped, shown as a warning or fatal.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub analyses: Vec<AssetAnalysis>,
    pub failures: Vec<AnalyzerError>,
}

/// The main analysis pipeline: provider -> risk engine -> simulator.
#[derive(Clone)]
pub struct Analyzer {
    settings: AnalyzerSettings,
    provider: Arc<dyn PriceSeriesProvider>,
    engine: RiskMetricsEngine,
    simulator: MonteCarloSimulator,
}

impl Analyzer {
    pub fn new(settings: AnalyzerSettings, provider: Arc<dyn PriceSeriesProvider>) -> Self {
        let engine = RiskMetricsEngine::new(settings.engine.clone());
        Self {
            settings,
            provider,
            engine,
            simulator: MonteCarloSimulator::new(),
        }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Fetches a history, reporting any provider failure as `DataUnavailable`.
    pub async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, AnalyzerError> {
        self.provider
            .fetch_series(symbol, start, end)
            .await
            .map_err(|source| AnalyzerError::DataUnavailable {
                symbol: symbol.to_string(),
                source,
            })
    }

    /// Runs the synchronous part of the pipeline on an already fetched series.
    pub fn analyze_series(
        &self,
        series: PriceSeries,
        seed: Option<u64>,
    ) -> Result<AssetAnalysis, AnalyzerError> {
        let symbol = series.symbol().to_string();

        // 1. Historical statistics
        let statistics = self
            .engine
            .analyze(&series)
            .map_err(|source| AnalyzerError::Analytics {
                symbol: symbol.clone(),
                source,
            })?;

        // 2. Forward simulation calibrated from them
        let params = SimulationParams::from_statistics(
            &statistics,
            self.settings.horizon_days,
            self.settings.num_simulations,
            seed,
        );
        let simulation = self
            .simulator
            .simulate(&params)
            .map_err(|source| AnalyzerError::Simulation {
                symbol: symbol.clone(),
                source,
            })?;

        // 3. Terminal distribution
        let summary = self.simulator.summarize(&simulation);

        tracing::info!(
            symbol = %symbol,
            volatility = statistics.annualized_volatility,
            sharpe = statistics.sharpe_ratio,
            expected_price = summary.expected_price,
            probability_of_loss = summary.probability_of_loss,
            "Analysis complete."
        );

        Ok(AssetAnalysis {
            series,
            statistics,
            simulation,
            summary,
        })
    }

    /// Fetches and analyzes a single symbol.
    pub async fn analyze_symbol(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        seed: Option<u64>,
    ) -> Result<AssetAnalysis, AnalyzerError> {
        let series = self.fetch(symbol, start, end).await?;
        self.analyze_series(series, seed)
    }

    /// Fetches every symbol concurrently, then analyzes them in input order.
    pub async fn run(&self, symbols: &[String], start: NaiveDate, end: NaiveDate) -> BatchOutcome {
        let fetches = symbols.iter().map(|symbol| self.fetch(symbol, start, end));
        let histories = join_all(fetches).await;
        self.analyze_histories(histories)
    }

    /// Analyzes already fetched histories in order, collecting failures.
    ///
    /// The `index`-th history is simulated with `seed_for(index)`.
    pub fn analyze_histories(
        &self,
        histories: Vec<Result<PriceSeries, AnalyzerError>>,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for (index, history) in histories.into_iter().enumerate() {
            let seed = self.seed_for(index);
            match history.and_then(|series| self.analyze_series(series, seed)) {
                Ok(analysis) => outcome.analyses.push(analysis),
                Err(e) => {
                    tracing::warn!(symbol = %e.symbol(), error = %e, "Skipping symbol.");
                    outcome.failures.push(e);
                }
            }
        }
        outcome
    }

    /// Seed for the `index`-th symbol of a batch.
    pub fn seed_for(&self, index: usize) -> Option<u64> {
        self.settings.seed.map(|seed| seed.wrapping_add(index as u64))
    }
}
