//! # Vantage Monte Carlo Simulator
//!
//! Projects future price paths with Geometric Brownian Motion calibrated from
//! historical `RiskStatistics`, and reduces them to percentile and probability
//! summaries.
//!
//! A run is a single shot: build `SimulationParams`, call
//! `MonteCarloSimulator::simulate`, then `MonteCarloSimulator::summarize`. No
//! state survives between calls; each call owns its random number generator.

pub mod error;
pub mod params;
pub mod result;
pub mod simulator;

pub use error::SimulationError;
pub use params::SimulationParams;
pub use result::{FanChart, SimulationResult, SimulationSummary};
pub use simulator::MonteCarloSimulator;
