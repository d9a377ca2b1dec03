use analyzer::AssetAnalysis;
use serde::{Deserialize, Serialize};

/// The symbol that stands out on one metric, and its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub symbol: String,
    pub value: f64,
}

/// Cross-asset headline figures for the top of a report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub assets_analyzed: usize,
    pub best_total_return: Option<Highlight>,
    pub deepest_drawdown: Option<Highlight>,
    pub highest_volatility: Option<Highlight>,
}

impl ExecutiveSummary {
    pub fn from_analyses(analyses: &[AssetAnalysis]) -> Self {
        Self {
            assets_analyzed: analyses.len(),
            best_total_return: top_by(analyses, |a| a.statistics.total_return),
            deepest_drawdown: top_by(analyses, |a| a.statistics.max_drawdown.depth),
            highest_volatility: top_by(analyses, |a| a.statistics.annualized_volatility),
        }
    }

    /// A short plain-text paragraph for the report header.
    pub fn narrative(&self, simulations: usize, horizon_days: usize) -> String {
        let mut text = format!(
            "This report analyzes the risk and performance profile of {} assets.",
            self.assets_analyzed
        );
        if let (Some(best), Some(worst)) = (&self.best_total_return, &self.deepest_drawdown) {
            text.push_str(&format!(
                " Over the selected period, {} delivered the highest cumulative return ({:.1}%), \
                 while {} experienced the deepest drawdown ({:.1}%).",
                best.symbol,
                best.value * 100.0,
                worst.symbol,
                worst.value * 100.0
            ));
        }
        if let Some(vol) = &self.highest_volatility {
            text.push_str(&format!(
                " {} showed the highest annualized volatility ({:.1}%).",
                vol.symbol,
                vol.value * 100.0
            ));
        }
        text.push_str(&format!(
            " Monte Carlo simulations ({simulations} runs) project each asset {horizon_days} trading days forward."
        ));
        text
    }
}

/// The analysis with the largest value of `metric`; the first one wins ties.
fn top_by<F>(analyses: &[AssetAnalysis], metric: F) -> Option<Highlight>
where
    F: Fn(&AssetAnalysis) -> f64,
{
    analyses
        .iter()
        .fold(None::<&AssetAnalysis>, |best, a| match best {
            Some(b) if metric(b) >= metric(a) => Some(b),
            _ => Some(a),
        })
        .map(|a| Highlight {
            symbol: a.symbol().to_string(),
            value: metric(a),
        })
}
