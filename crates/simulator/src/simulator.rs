use crate::error::SimulationError;
use crate::params::SimulationParams;
use crate::result::{SimulationResult, SimulationSummary};
use analytics::quantile::quantile;
use ndarray::{Array2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

/// Geometric Brownian Motion path generator.
///
/// Each step applies `price[t] = price[t-1] * exp((mu - sigma^2 / 2) + sigma * z)`
/// with `z ~ N(0, 1)` and a step of one trading day.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonteCarloSimulator;

impl MonteCarloSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Generates `num_simulations` independent paths of `horizon_days` steps.
    ///
    /// The whole shock matrix is drawn up front, turned into daily growth
    /// factors, compounded along the time axis and scaled by the last price.
    /// With a seed the matrix is bit-for-bit reproducible; without one the
    /// generator is seeded from OS entropy. The generator never outlives the call.
    pub fn simulate(&self, params: &SimulationParams) -> Result<SimulationResult, SimulationError> {
        params.validate()?;

        let mut rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let sigma = params.daily_volatility;
        let drift = params.daily_drift - 0.5 * sigma * sigma;

        let mut paths = Array2::from_shape_simple_fn((params.num_simulations, params.horizon_days), || {
            let z: f64 = StandardNormal.sample(&mut rng);
            (drift + sigma * z).exp()
        });
        paths.accumulate_axis_inplace(Axis(1), |&previous, current| *current *= previous);
        paths.mapv_inplace(|growth| growth * params.last_price);

        tracing::debug!(
            simulations = params.num_simulations,
            horizon = params.horizon_days,
            seeded = params.rng_seed.is_some(),
            "Generated GBM paths."
        );

        Ok(SimulationResult::new(params.clone(), paths))
    }

    /// Reduces the terminal prices of a run to summary statistics.
    ///
    /// Percentiles use the same linear interpolation as historical VaR.
    pub fn summarize(&self, result: &SimulationResult) -> SimulationSummary {
        let initial_price = result.initial_price();
        let mut terminal = result.terminal_prices();
        terminal.sort_by(f64::total_cmp);

        let n = terminal.len() as f64;
        let expected_price = terminal.iter().sum::<f64>() / n;
        let median_price = quantile(&terminal, 0.5).unwrap_or(f64::NAN);
        let percentile_5 = quantile(&terminal, 0.05).unwrap_or(f64::NAN);
        let percentile_95 = quantile(&terminal, 0.95).unwrap_or(f64::NAN);
        let losses = terminal.iter().filter(|&&price| price < initial_price).count();

        SimulationSummary {
            initial_price,
            num_simulations: result.num_simulations(),
            horizon_days: result.horizon_days(),
            expected_price,
            median_price,
            percentile_5,
            percentile_95,
            probability_of_loss: losses as f64 / n,
            expected_return: expected_price / initial_price - 1.0,
            return_at_percentile_5: percentile_5 / initial_price - 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn params(seed: Option<u64>) -> SimulationParams {
        SimulationParams {
            last_price: 100.0,
            daily_drift: 0.0005,
            daily_volatility: 0.02,
            horizon_days: 30,
            num_simulations: 200,
            rng_seed: seed,
        }
    }

    #[test]
    fn matrix_has_simulation_by_horizon_shape() {
        let result = MonteCarloSimulator::new().simulate(&params(Some(1))).unwrap();
        assert_eq!(result.paths().dim(), (200, 30));
        assert_eq!(result.terminal_prices().len(), 200);
        assert!(result.paths().iter().all(|&p| p > 0.0 && p.is_finite()));
    }

    #[test]
    fn seeded_runs_are_bit_identical() {
        let sim = MonteCarloSimulator::new();
        let a = sim.simulate(&params(Some(42))).unwrap();
        let b = sim.simulate(&params(Some(42))).unwrap();
        assert!(a.paths().iter().zip(b.paths().iter()).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn different_seeds_differ() {
        let sim = MonteCarloSimulator::new();
        let a = sim.simulate(&params(Some(1))).unwrap();
        let b = sim.simulate(&params(Some(2))).unwrap();
        assert_ne!(a.paths(), b.paths());
    }

    #[test]
    fn unseeded_runs_draw_fresh_entropy() {
        let sim = MonteCarloSimulator::new();
        let a = sim.simulate(&params(None)).unwrap();
        let b = sim.simulate(&params(None)).unwrap();
        assert_ne!(a.paths(), b.paths());
    }

    #[test]
    fn zero_volatility_without_drift_stays_flat() {
        let flat = SimulationParams {
            last_price: 100.0,
            daily_drift: 0.0,
            daily_volatility: 0.0,
            horizon_days: 10,
            num_simulations: 5,
            rng_seed: None,
        };
        let sim = MonteCarloSimulator::new();
        let result = sim.simulate(&flat).unwrap();
        assert!(result.paths().iter().all(|&p| p == 100.0));

        let summary = sim.summarize(&result);
        assert_eq!(summary.probability_of_loss, 0.0);
        assert_eq!(summary.expected_price, 100.0);
        assert_eq!(summary.percentile_5, 100.0);
    }

    #[test]
    fn zero_volatility_with_drift_compounds() {
        let drifting = SimulationParams {
            daily_drift: 0.01,
            daily_volatility: 0.0,
            horizon_days: 3,
            ..params(Some(3))
        };
        let sim = MonteCarloSimulator::new();
        let result = sim.simulate(&drifting).unwrap();
        for path in result.paths().rows() {
            assert_relative_eq!(path[2], 100.0 * (0.03_f64).exp(), epsilon = 1e-9);
        }
        assert_eq!(sim.summarize(&result).probability_of_loss, 0.0);
    }

    #[rstest]
    #[case::no_paths(SimulationParams { num_simulations: 0, ..params(None) }, "num_simulations")]
    #[case::no_horizon(SimulationParams { horizon_days: 0, ..params(None) }, "horizon_days")]
    #[case::zero_price(SimulationParams { last_price: 0.0, ..params(None) }, "last_price")]
    #[case::nan_price(SimulationParams { last_price: f64::NAN, ..params(None) }, "last_price")]
    #[case::negative_vol(SimulationParams { daily_volatility: -0.1, ..params(None) }, "daily_volatility")]
    #[case::infinite_drift(SimulationParams { daily_drift: f64::INFINITY, ..params(None) }, "daily_drift")]
    fn rejects_invalid_parameters(#[case] bad: SimulationParams, #[case] field: &str) {
        let err = MonteCarloSimulator::new().simulate(&bad).unwrap_err();
        let SimulationError::InvalidParameter { name, .. } = err;
        assert_eq!(name, field);
    }

    #[test]
    fn summary_bands_are_ordered() {
        let sim = MonteCarloSimulator::new();
        let result = sim.simulate(&params(Some(7))).unwrap();
        let summary = sim.summarize(&result);
        assert!(summary.percentile_5 <= summary.median_price);
        assert!(summary.median_price <= summary.percentile_95);
        assert!((0.0..=1.0).contains(&summary.probability_of_loss));
        assert_relative_eq!(
            summary.expected_return,
            summary.expected_price / 100.0 - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn fan_chart_tracks_each_day() {
        let result = MonteCarloSimulator::new().simulate(&params(Some(9))).unwrap();
        let fan = result.fan_chart();
        assert_eq!(fan.lower.len(), 30);
        assert_eq!(fan.mean.len(), 30);
        for day in 0..30 {
            assert!(fan.lower[day] <= fan.median[day]);
            assert!(fan.median[day] <= fan.upper[day]);
        }
        assert_eq!(*fan.median.last().unwrap(), MonteCarloSimulator::new().summarize(&result).median_price);
    }
}
