use thiserror::Error;

/// Failures while assembling the settings from `config.toml` and `VANTAGE_*` variables.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file or an environment override could not be read or parsed into `Config`.
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    /// The sources parsed, but the values are inconsistent (e.g. start after end).
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
