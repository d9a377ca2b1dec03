use serde::{Deserialize, Serialize};

/// How a period-over-period return is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    /// `p[t] / p[t-1] - 1`
    #[default]
    Simple,
    /// `ln(p[t] / p[t-1])`
    Log,
}

impl ReturnKind {
    /// Computes the return between two consecutive prices.
    pub fn between(&self, previous: f64, current: f64) -> f64 {
        match self {
            ReturnKind::Simple => current / previous - 1.0,
            ReturnKind::Log => (current / previous).ln(),
        }
    }

    /// Applies a return to a price. Inverse of [`ReturnKind::between`].
    pub fn apply(&self, price: f64, ret: f64) -> f64 {
        match self {
            ReturnKind::Simple => price * (1.0 + ret),
            ReturnKind::Log => price * ret.exp(),
        }
    }
}

/// Broad asset class, used to pick the number of trading periods per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Equity,
    Crypto,
}

impl AssetClass {
    /// Infers the asset class from a ticker symbol.
    ///
    /// Crypto pairs are quoted either Yahoo style (`BTC-USD`) or exchange style
    /// (`BTCUSDT`); everything else is treated as an equity.
    pub fn from_symbol(symbol: &str) -> Self {
        let upper = symbol.to_ascii_uppercase();
        if upper.ends_with("-USD") || upper.ends_with("-USDT") || upper.ends_with("USDT") {
            AssetClass::Crypto
        } else {
            AssetClass::Equity
        }
    }
}
