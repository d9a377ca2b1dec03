use crate::error::AnalyticsError;
use crate::metrics::{self, sample_std_dev};
use crate::report::RiskStatistics;
use core_types::{AssetClass, PriceSeries, ReturnKind};
use serde::{Deserialize, Serialize};

/// Inputs that shape a risk analysis but are not part of the price data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub return_kind: ReturnKind,
    /// Annual risk-free rate used for the Sharpe ratio.
    pub risk_free_rate: f64,
    /// Confidence level for VaR and CVaR, e.g. 0.95.
    pub confidence: f64,
    pub trading_days_equity: u32,
    pub trading_days_crypto: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            return_kind: ReturnKind::Simple,
            risk_free_rate: 0.04,
            confidence: 0.95,
            trading_days_equity: 252,
            trading_days_crypto: 365,
        }
    }
}

impl EngineSettings {
    /// Trading periods per year for a symbol, based on its asset class.
    pub fn periods_per_year(&self, symbol: &str) -> u32 {
        match AssetClass::from_symbol(symbol) {
            AssetClass::Equity => self.trading_days_equity,
            AssetClass::Crypto => self.trading_days_crypto,
        }
    }
}

/// A stateless calculator for deriving risk statistics from a price history.
#[derive(Debug, Default, Clone)]
pub struct RiskMetricsEngine {
    settings: EngineSettings,
}

impl RiskMetricsEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The main entry point for calculating risk statistics.
    ///
    /// # Arguments
    ///
    /// * `prices` - The full daily closing price history of one symbol.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `RiskStatistics` or an `AnalyticsError`. At least
    /// three prices are needed, since the volatility is a sample estimate over
    /// the returns.
    pub fn analyze(&self, prices: &PriceSeries) -> Result<RiskStatistics, AnalyticsError> {
        let settings = &self.settings;
        let periods_per_year = settings.periods_per_year(prices.symbol());

        let returns = metrics::compute_returns(prices, settings.return_kind)?;
        let daily_volatility = sample_std_dev(returns.values(), "annualized volatility")?;
        let annualized_volatility = metrics::annualized_volatility(&returns, periods_per_year)?;
        let sharpe_ratio = metrics::sharpe_ratio(&returns, settings.risk_free_rate, periods_per_year)?;
        let max_drawdown = metrics::max_drawdown(prices)?;
        let value_at_risk = metrics::value_at_risk(&returns, settings.confidence)?;
        let conditional_value_at_risk = metrics::conditional_value_at_risk(&returns, settings.confidence)?;
        let total_return = metrics::total_return(&returns)?;
        let daily_mean_return = metrics::mean(returns.values());

        let last = prices
            .last()
            .ok_or_else(|| AnalyticsError::insufficient("last price", 1, 0))?;

        let stats = RiskStatistics {
            symbol: prices.symbol().to_string(),
            observations: returns.len(),
            periods_per_year,
            return_kind: settings.return_kind,
            total_return,
            annualized_return: daily_mean_return * f64::from(periods_per_year),
            daily_mean_return,
            daily_volatility,
            annualized_volatility,
            sharpe_ratio,
            max_drawdown,
            confidence: settings.confidence,
            value_at_risk,
            conditional_value_at_risk,
            last_price: last.close,
            last_date: last.date,
        };

        tracing::debug!(
            symbol = %stats.symbol,
            observations = stats.observations,
            volatility = stats.annualized_volatility,
            sharpe = stats.sharpe_ratio,
            max_drawdown = stats.max_drawdown.depth,
            var = stats.value_at_risk,
            "Computed risk statistics."
        );

        Ok(stats)
    }
}
