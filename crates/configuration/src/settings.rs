use chrono::NaiveDate;
use core_types::ReturnKind;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an absent `config.toml` or a
/// partial one is fine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub analysis: AnalysisSettings,
    pub monte_carlo: MonteCarloSettings,
    pub reports: ReportSettings,
    pub server: ServerSettings,
}

/// Where price histories come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// The Yahoo Finance chart API.
    #[default]
    Yahoo,
    /// `{symbol}.csv` files under `data_dir`.
    Csv,
}

/// Contains the default symbols and history window to analyze.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// The symbols to analyze (e.g., "AAPL", "BTC-USD").
    pub tickers: Vec<String>,
    /// First date of the history window.
    pub start_date: NaiveDate,
    /// End of the history window (exclusive).
    pub end_date: NaiveDate,
    pub source: DataSource,
    /// Directory of raw `{symbol}.csv` histories.
    pub data_dir: PathBuf,
    /// Save histories fetched from the API into `data_dir`.
    pub cache_raw: bool,
    pub yahoo_base_url: String,
}

/// Contains parameters for the historical risk estimators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Annual risk-free rate as a fraction (0.04 corresponds to 4%).
    pub risk_free_rate: f64,
    /// Confidence level for VaR and CVaR.
    pub confidence: f64,
    pub return_kind: ReturnKind,
    /// Trading periods per year for equities.
    pub trading_days_stock: u32,
    /// Trading periods per year for crypto, which trades every day.
    pub trading_days_crypto: u32,
}

/// Contains parameters for the Monte Carlo projection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    pub simulations: usize,
    /// Number of trading days to project forward.
    pub horizon_days: usize,
    /// Base seed for reproducible runs. Unset means fresh entropy per run.
    pub seed: Option<u64>,
}

/// Contains parameters for the report artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    /// How many simulated paths per symbol are written to the paths CSV.
    pub max_paths_exported: usize,
}

/// Contains parameters for the dashboard API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: String,
    /// Upper bound on `sims` accepted from a single dashboard request.
    pub max_simulations: usize,
    /// Upper bound on `horizon` accepted from a single dashboard request.
    pub max_horizon_days: usize,
}

// --- Default Implementations ---
// These allow a user to omit any section from their toml and still have it
// work with sensible defaults.

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            tickers: ["AAPL", "MSFT", "BTC-USD", "ETH-USD"]
                .into_iter()
                .map(String::from)
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            source: DataSource::Yahoo,
            data_dir: PathBuf::from("data/raw"),
            cache_raw: false,
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.04,
            confidence: 0.95,
            return_kind: ReturnKind::Simple,
            trading_days_stock: 252,
            trading_days_crypto: 365,
        }
    }
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            simulations: 1000,
            horizon_days: 252, // 1 year
            seed: None,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            max_paths_exported: 50,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            max_simulations: 5000,
            max_horizon_days: 365,
        }
    }
}
