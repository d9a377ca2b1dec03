use crate::summary::ExecutiveSummary;
use analytics::{RiskStatistics, drawdown_series};
use analyzer::{AssetAnalysis, BatchOutcome};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use simulator::{FanChart, SimulationSummary};

/// Everything the report shows for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReport {
    pub statistics: RiskStatistics,
    pub simulation: SimulationSummary,
    pub fan_chart: FanChart,
    pub drawdown_curve: Vec<(NaiveDate, f64)>,
}

impl AssetReport {
    pub fn from_analysis(analysis: &AssetAnalysis) -> Self {
        Self {
            statistics: analysis.statistics.clone(),
            simulation: analysis.summary.clone(),
            fan_chart: analysis.simulation.fan_chart(),
            drawdown_curve: drawdown_series(&analysis.series),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedSymbol {
    pub symbol: String,
    pub reason: String,
}

/// The complete report document for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub generated_at: DateTime<Utc>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub simulations: usize,
    pub horizon_days: usize,
    pub executive_summary: ExecutiveSummary,
    pub narrative: String,
    pub assets: Vec<AssetReport>,
    pub failures: Vec<FailedSymbol>,
}

impl RiskReport {
    pub fn build(
        outcome: &BatchOutcome,
        period_start: NaiveDate,
        period_end: NaiveDate,
        simulations: usize,
        horizon_days: usize,
    ) -> Self {
        let executive_summary = ExecutiveSummary::from_analyses(&outcome.analyses);
        let narrative = executive_summary.narrative(simulations, horizon_days);
        Self {
            generated_at: Utc::now(),
            period_start,
            period_end,
            simulations,
            horizon_days,
            executive_summary,
            narrative,
            assets: outcome.analyses.iter().map(AssetReport::from_analysis).collect(),
            failures: outcome
                .failures
                .iter()
                .map(|e| FailedSymbol {
                    symbol: e.symbol().to_string(),
                    reason: e.to_string(),
                })
                .collect(),
        }
    }
}
