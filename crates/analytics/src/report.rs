use chrono::NaiveDate;
use core_types::ReturnKind;
use serde::{Deserialize, Serialize};

/// The deepest peak-to-trough decline of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawdown {
    /// Relative decline as a positive fraction; 0.5 means the price halved.
    pub depth: f64,
    pub peak_date: NaiveDate,
    pub trough_date: NaiveDate,
}

/// The standardized set of historical risk statistics for one symbol.
///
/// This struct is the final output of the `RiskMetricsEngine` and is what the
/// simulator calibrates from and the reporter renders. Rates are fractions
/// (0.04 means 4%); tail figures are positive loss magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskStatistics {
    pub symbol: String,
    /// Number of returns the statistics were estimated from.
    pub observations: usize,
    pub periods_per_year: u32,
    /// How the returns behind every figure below were measured.
    pub return_kind: ReturnKind,

    // I. Return Metrics
    pub total_return: f64,
    pub annualized_return: f64,
    pub daily_mean_return: f64,

    // II. Volatility and Drawdown
    pub daily_volatility: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64, // 0.0 when volatility is exactly zero
    pub max_drawdown: Drawdown,

    // III. Tail Risk
    pub confidence: f64,
    pub value_at_risk: f64,
    pub conditional_value_at_risk: f64,

    // IV. Last Observation
    pub last_price: f64,
    pub last_date: NaiveDate,
}
