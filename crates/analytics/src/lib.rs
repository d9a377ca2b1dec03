//! # Vantage Analytics Engine
//!
//! This crate turns a historical `PriceSeries` into a fixed set of risk statistics.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Deterministic Calculation:** Nothing here draws random numbers or keeps state
//!   between calls. The same series always produces the same `RiskStatistics`.
//!
//! ## Public API
//!
//! - `RiskMetricsEngine`: Computes the full `RiskStatistics` record for a series.
//! - `metrics`: The individual estimators (returns, volatility, drawdown, Sharpe, VaR, CVaR).
//! - `quantile`: The interpolation rule shared by historical VaR and simulated percentile bands.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod metrics;
pub mod quantile;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{EngineSettings, RiskMetricsEngine};
pub use error::AnalyticsError;
pub use metrics::{
    annualized_volatility, compute_returns, conditional_value_at_risk, drawdown_series,
    max_drawdown, rebase, sharpe_ratio, total_return, value_at_risk,
};
pub use quantile::{quantile, quantile_unsorted};
pub use report::{Drawdown, RiskStatistics};
