use crate::error::SimulationError;
use analytics::RiskStatistics;
use core_types::ReturnKind;
use serde::{Deserialize, Serialize};

/// Inputs to a single GBM simulation run.
///
/// Drift and volatility are **daily** figures; one simulation step is one
/// trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub last_price: f64,
    pub daily_drift: f64,
    pub daily_volatility: f64,
    pub horizon_days: usize,
    pub num_simulations: usize,
    /// Fixed seed for reproducible runs; `None` draws fresh entropy.
    pub rng_seed: Option<u64>,
}

impl SimulationParams {
    /// Calibrates a run from historical statistics.
    ///
    /// The engine reports an annualized volatility, so it is de-annualized here
    /// with the same periods-per-year it was scaled by. The paths start from the
    /// last observed close.
    ///
    /// The drift is the mean daily simple return. A mean log return already has
    /// the `sigma^2 / 2` volatility drag taken out, and `simulate` subtracts it
    /// again, so it is added back here.
    pub fn from_statistics(
        stats: &RiskStatistics,
        horizon_days: usize,
        num_simulations: usize,
        rng_seed: Option<u64>,
    ) -> Self {
        let daily_volatility = stats.annualized_volatility / f64::from(stats.periods_per_year).sqrt();
        let daily_drift = match stats.return_kind {
            ReturnKind::Simple => stats.daily_mean_return,
            ReturnKind::Log => stats.daily_mean_return + 0.5 * daily_volatility * daily_volatility,
        };
        Self {
            last_price: stats.last_price,
            daily_drift,
            daily_volatility,
            horizon_days,
            num_simulations,
            rng_seed,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_simulations < 1 {
            return Err(SimulationError::invalid("num_simulations", "must be at least 1"));
        }
        if self.horizon_days < 1 {
            return Err(SimulationError::invalid("horizon_days", "must be at least 1"));
        }
        if !self.last_price.is_finite() || self.last_price <= 0.0 {
            return Err(SimulationError::invalid(
                "last_price",
                format!("must be positive, got {}", self.last_price),
            ));
        }
        if !self.daily_volatility.is_finite() || self.daily_volatility < 0.0 {
            return Err(SimulationError::invalid(
                "daily_volatility",
                format!("must be non-negative, got {}", self.daily_volatility),
            ));
        }
        if !self.daily_drift.is_finite() {
            return Err(SimulationError::invalid(
                "daily_drift",
                format!("must be finite, got {}", self.daily_drift),
            ));
        }
        Ok(())
    }
}
