use analytics::EngineSettings;
use analyzer::error::AnalyzerError;
use analyzer::{Analyzer, AnalyzerSettings, provider_from_config};
use api_client::PriceSeriesProvider;
use api_client::error::ApiError;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use configuration::{Config, DataSource};
use core_types::{PricePoint, PriceSeries};
use std::collections::HashMap;
use std::sync::Arc;

/// Serves canned histories; unknown symbols behave like a failed fetch.
struct StaticProvider {
    histories: HashMap<String, Vec<f64>>,
}

#[async_trait]
impl PriceSeriesProvider for StaticProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let closes = self
            .histories
            .get(symbol)
            .ok_or_else(|| ApiError::EmptySeries(symbol.to_string()))?;
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Days::new(i as u64), c))
            .collect();
        Ok(PriceSeries::new(symbol, points)?)
    }
}

fn wave(len: usize, amplitude: f64) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + amplitude * (i as f64 * 0.7).sin() + 0.05 * i as f64)
        .collect()
}

fn analyzer(seed: Option<u64>) -> Analyzer {
    let histories = HashMap::from([
        ("AAPL".to_string(), wave(200, 4.0)),
        ("BTC-USD".to_string(), wave(200, 12.0)),
        ("TINY".to_string(), vec![10.0, 11.0]),
    ]);
    let settings = AnalyzerSettings {
        engine: EngineSettings::default(),
        horizon_days: 20,
        num_simulations: 300,
        seed,
    };
    Analyzer::new(settings, Arc::new(StaticProvider { histories }))
}

fn window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
}

#[tokio::test]
async fn analyzes_a_symbol_end_to_end() {
    let (start, end) = window();
    let analysis = analyzer(Some(11))
        .analyze_symbol("AAPL", start, end, Some(11))
        .await
        .unwrap();

    assert_eq!(analysis.symbol(), "AAPL");
    assert_eq!(analysis.statistics.observations, 199);
    assert_eq!(analysis.simulation.paths().dim(), (300, 20));
    assert_eq!(analysis.summary.initial_price, analysis.statistics.last_price);
    assert!((0.0..=1.0).contains(&analysis.summary.probability_of_loss));
}

#[tokio::test]
async fn fetch_failures_become_data_unavailable() {
    let (start, end) = window();
    let err = analyzer(None)
        .analyze_symbol("MISSING", start, end, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::DataUnavailable { ref symbol, .. } if symbol == "MISSING"));
}

#[tokio::test]
async fn short_histories_are_insufficient() {
    let (start, end) = window();
    let err = analyzer(None)
        .analyze_symbol("TINY", start, end, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::Analytics { .. }));
    assert_eq!(err.symbol(), "TINY");
}

#[tokio::test]
async fn batch_collects_failures_and_keeps_order() {
    let (start, end) = window();
    let symbols: Vec<String> = ["BTC-USD", "MISSING", "AAPL", "TINY"]
        .into_iter()
        .map(String::from)
        .collect();
    let outcome = analyzer(Some(5)).run(&symbols, start, end).await;

    let analyzed: Vec<&str> = outcome.analyses.iter().map(|a| a.symbol()).collect();
    assert_eq!(analyzed, vec!["BTC-USD", "AAPL"]);
    let failed: Vec<&str> = outcome.failures.iter().map(|e| e.symbol()).collect();
    assert_eq!(failed, vec!["MISSING", "TINY"]);
    assert_eq!(outcome.analyses[0].statistics.periods_per_year, 365);
}

#[tokio::test]
async fn seeded_batches_are_reproducible() {
    let (start, end) = window();
    let symbols = vec!["AAPL".to_string(), "BTC-USD".to_string()];
    let first = analyzer(Some(99)).run(&symbols, start, end).await;
    let second = analyzer(Some(99)).run(&symbols, start, end).await;

    for (a, b) in first.analyses.iter().zip(&second.analyses) {
        assert_eq!(a.simulation.paths(), b.simulation.paths());
        assert_eq!(a.summary, b.summary);
    }
    assert_eq!(analyzer(Some(99)).seed_for(1), Some(100));
    assert_eq!(analyzer(None).seed_for(1), None);
}

#[test]
fn settings_follow_configuration() {
    let mut config = Config::default();
    config.analysis.confidence = 0.99;
    config.monte_carlo.simulations = 123;
    config.monte_carlo.seed = Some(7);
    let settings = AnalyzerSettings::from_config(&config);
    assert_eq!(settings.engine.confidence, 0.99);
    assert_eq!(settings.engine.trading_days_equity, 252);
    assert_eq!(settings.num_simulations, 123);
    assert_eq!(settings.seed, Some(7));
}

#[tokio::test]
async fn csv_source_reads_the_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("SPY.csv"),
        "date,close\n2023-01-03,380.8\n2023-01-04,383.8\n2023-01-05,379.4\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.data.source = DataSource::Csv;
    config.data.data_dir = dir.path().to_path_buf();
    let provider = provider_from_config(&config.data).unwrap();

    let (start, end) = window();
    let series = provider.fetch_series("SPY", start, end).await.unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.last().unwrap().close, 379.4);
}
