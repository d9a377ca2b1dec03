use crate::params::SimulationParams;
use analytics::quantile::quantile;
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// The full output of one simulation run.
///
/// `paths` has one row per simulation and one column per simulated day; column
/// `t` holds the price at the end of day `t + 1`. The initial price is not part
/// of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    params: SimulationParams,
    paths: Array2<f64>,
}

impl SimulationResult {
    pub(crate) fn new(params: SimulationParams, paths: Array2<f64>) -> Self {
        Self { params, paths }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn paths(&self) -> &Array2<f64> {
        &self.paths
    }

    pub fn initial_price(&self) -> f64 {
        self.params.last_price
    }

    pub fn num_simulations(&self) -> usize {
        self.paths.nrows()
    }

    pub fn horizon_days(&self) -> usize {
        self.paths.ncols()
    }

    /// One path as a row view.
    pub fn path(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.num_simulations()).then(|| self.paths.row(index))
    }

    /// Prices on the final simulated day, one per path.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.paths.column(self.horizon_days() - 1).to_vec()
    }

    /// Cross-sectional mean price for each day.
    pub fn mean_path(&self) -> Vec<f64> {
        self.paths
            .mean_axis(Axis(0))
            .map(|mean| mean.to_vec())
            .unwrap_or_default()
    }

    /// Cross-sectional `p` quantile for each day, with the same interpolation
    /// rule as historical VaR.
    pub fn percentile_path(&self, p: f64) -> Vec<f64> {
        self.paths
            .columns()
            .into_iter()
            .map(|day| {
                let mut prices = day.to_vec();
                prices.sort_by(f64::total_cmp);
                quantile(&prices, p).unwrap_or(f64::NAN)
            })
            .collect()
    }

    /// Percentile bands and mean path for fan charts.
    pub fn fan_chart(&self) -> FanChart {
        FanChart {
            initial_price: self.initial_price(),
            lower: self.percentile_path(0.05),
            median: self.percentile_path(0.5),
            upper: self.percentile_path(0.95),
            mean: self.mean_path(),
        }
    }
}

/// Per-day bands of a simulation for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanChart {
    pub initial_price: f64,
    /// 5th percentile per day.
    pub lower: Vec<f64>,
    pub median: Vec<f64>,
    /// 95th percentile per day.
    pub upper: Vec<f64>,
    pub mean: Vec<f64>,
}

/// Distribution of terminal prices for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub initial_price: f64,
    pub num_simulations: usize,
    pub horizon_days: usize,
    pub expected_price: f64,
    pub median_price: f64,
    /// 5th percentile terminal price (worst case at 95% confidence).
    pub percentile_5: f64,
    /// 95th percentile terminal price (best case at 95% confidence).
    pub percentile_95: f64,
    /// Share of paths that finish strictly below the initial price.
    pub probability_of_loss: f64,
    pub expected_return: f64,
    pub return_at_percentile_5: f64,
}
