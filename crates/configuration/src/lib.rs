use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AnalysisSettings, Config, DataSettings, DataSource, MonteCarloSettings, ReportSettings,
    ServerSettings,
};

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. built-in defaults,
/// 2. the TOML file at `path` (optional when it does not exist),
/// 3. `VANTAGE_`-prefixed environment variables, with `__` between nested keys
///    (e.g. `VANTAGE_MONTE_CARLO__SIMULATIONS=5000`,
///    `VANTAGE_DATA__TICKERS=AAPL,MSFT`).
///
/// The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("VANTAGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("data.tickers"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

/// Rejects settings that would make an analysis run meaningless.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let fail = |msg: String| Err(ConfigError::ValidationError(msg));

    let data = &config.data;
    if data.start_date >= data.end_date {
        return fail(format!(
            "data.start_date ({}) must be before data.end_date ({})",
            data.start_date, data.end_date
        ));
    }
    if data.tickers.iter().any(|t| t.trim().is_empty()) {
        return fail("data.tickers must not contain empty symbols".to_string());
    }

    let analysis = &config.analysis;
    if !analysis.risk_free_rate.is_finite() || analysis.risk_free_rate <= -1.0 {
        return fail(format!(
            "analysis.risk_free_rate must be above -1.0, got {}",
            analysis.risk_free_rate
        ));
    }
    if !(analysis.confidence > 0.0 && analysis.confidence < 1.0) {
        return fail(format!(
            "analysis.confidence must be between 0 and 1, got {}",
            analysis.confidence
        ));
    }
    if analysis.trading_days_stock == 0 || analysis.trading_days_crypto == 0 {
        return fail("analysis trading days must be positive".to_string());
    }

    let mc = &config.monte_carlo;
    if mc.simulations == 0 {
        return fail("monte_carlo.simulations must be at least 1".to_string());
    }
    if mc.horizon_days == 0 {
        return fail("monte_carlo.horizon_days must be at least 1".to_string());
    }

    let server = &config.server;
    if server.max_simulations == 0 || server.max_horizon_days == 0 {
        return fail("server limits must be positive".to_string());
    }

    Ok(())
}
