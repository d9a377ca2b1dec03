//! Closed-form historical risk estimators.
//!
//! Every function here is pure: inputs are borrowed, nothing is cached, and a
//! genuine data problem is always reported as an `AnalyticsError` rather than
//! papered over with a default number. The single exception is the
//! zero-volatility branch of [`sharpe_ratio`].

use crate::error::AnalyticsError;
use crate::quantile::{quantile, sorted_copy};
use crate::report::Drawdown;
use chrono::NaiveDate;
use core_types::{PriceSeries, ReturnKind, ReturnSeries};

/// Computes the period-over-period returns of a price series.
///
/// The result has exactly `prices.len() - 1` entries.
pub fn compute_returns(prices: &PriceSeries, kind: ReturnKind) -> Result<ReturnSeries, AnalyticsError> {
    if prices.len() < 2 {
        return Err(AnalyticsError::insufficient("returns", 2, prices.len()));
    }

    let (dates, values) = prices
        .points()
        .windows(2)
        .map(|w| (w[1].date, kind.between(w[0].close, w[1].close)))
        .unzip();

    ReturnSeries::new(kind, dates, values).map_err(|e| AnalyticsError::InvalidInput("returns", e.to_string()))
}

/// Sample standard deviation of the returns scaled by `sqrt(periods_per_year)`.
///
/// Uses the `n - 1` denominator, so at least two returns are required.
pub fn annualized_volatility(returns: &ReturnSeries, periods_per_year: u32) -> Result<f64, AnalyticsError> {
    check_periods(periods_per_year)?;
    let std_dev = sample_std_dev(returns.values(), "annualized volatility")?;
    Ok(std_dev * f64::from(periods_per_year).sqrt())
}

/// Largest relative peak-to-trough decline of the series.
///
/// The running peak only moves on a strictly higher close and a new trough only
/// replaces the current one when it is strictly deeper, so ties resolve to the
/// earliest peak/trough pair. A series that never declines reports a depth of
/// exactly zero with both dates on the first observation.
pub fn max_drawdown(prices: &PriceSeries) -> Result<Drawdown, AnalyticsError> {
    let first = prices
        .first()
        .ok_or_else(|| AnalyticsError::insufficient("max drawdown", 1, 0))?;

    let mut peak = first;
    let mut worst = Drawdown {
        depth: 0.0,
        peak_date: first.date,
        trough_date: first.date,
    };

    for point in prices.points() {
        if point.close > peak.close {
            peak = point;
        }
        let depth = (peak.close - point.close) / peak.close;
        if depth > worst.depth {
            worst = Drawdown {
                depth,
                peak_date: peak.date,
                trough_date: point.date,
            };
        }
    }

    Ok(worst)
}

/// Annualized Sharpe ratio of the returns against an annual risk-free rate.
///
/// The annual rate is converted to a per-period rate by compounding,
/// `(1 + rf)^(1 / periods_per_year) - 1`, and the ratio is
/// `mean(excess) * periods_per_year / (std * sqrt(periods_per_year))`.
///
/// Returns `0.0` when the volatility is exactly zero. That is the only case
/// where this function yields a value without a meaningful estimate behind it.
pub fn sharpe_ratio(
    returns: &ReturnSeries,
    risk_free_rate: f64,
    periods_per_year: u32,
) -> Result<f64, AnalyticsError> {
    check_periods(periods_per_year)?;
    if !risk_free_rate.is_finite() || risk_free_rate <= -1.0 {
        return Err(AnalyticsError::InvalidInput(
            "risk-free rate",
            format!("must be finite and above -100%, got {risk_free_rate}"),
        ));
    }

    let std_dev = sample_std_dev(returns.values(), "sharpe ratio")?;
    if std_dev == 0.0 {
        tracing::debug!("Zero volatility sample, reporting Sharpe ratio of 0.");
        return Ok(0.0);
    }

    let periods = f64::from(periods_per_year);
    let periodic_rf = (1.0 + risk_free_rate).powf(1.0 / periods) - 1.0;
    let excess_mean = mean(returns.values()) - periodic_rf;

    Ok((excess_mean * periods) / (std_dev * periods.sqrt()))
}

/// Historical Value at Risk at the given confidence, as a loss magnitude.
///
/// Takes the `1 - confidence` quantile of the returns (see [`crate::quantile`])
/// and negates it, so a 2% loss quantile is reported as `0.02`. The result is
/// signed: when even the tail quantile is a gain the VaR is negative.
pub fn value_at_risk(returns: &ReturnSeries, confidence: f64) -> Result<f64, AnalyticsError> {
    let threshold = tail_threshold(returns, confidence, "value at risk")?;
    Ok(-threshold)
}

/// Mean loss of all returns at or below the VaR threshold, as a loss magnitude.
///
/// Signed like [`value_at_risk`], and never below it.
pub fn conditional_value_at_risk(returns: &ReturnSeries, confidence: f64) -> Result<f64, AnalyticsError> {
    let threshold = tail_threshold(returns, confidence, "conditional value at risk")?;

    let tail: Vec<f64> = returns
        .values()
        .iter()
        .copied()
        .filter(|&r| r <= threshold)
        .collect();
    if tail.is_empty() {
        return Err(AnalyticsError::DegenerateSample("conditional value at risk"));
    }

    // Summation rounding can nudge the mean of a flat tail past the threshold.
    let tail_mean = mean(&tail).min(threshold);
    Ok(-tail_mean)
}

/// Cumulative return over the whole series.
pub fn total_return(returns: &ReturnSeries) -> Result<f64, AnalyticsError> {
    if returns.is_empty() {
        return Err(AnalyticsError::insufficient("total return", 1, 0));
    }
    let total = match returns.kind() {
        ReturnKind::Simple => returns.values().iter().map(|r| 1.0 + r).product::<f64>() - 1.0,
        ReturnKind::Log => returns.values().iter().sum::<f64>().exp() - 1.0,
    };
    Ok(total)
}

/// The underwater curve: `(close - running_peak) / running_peak` for each date.
///
/// Values are zero at new highs and negative below them.
pub fn drawdown_series(prices: &PriceSeries) -> Vec<(NaiveDate, f64)> {
    let mut peak = f64::MIN;
    prices
        .points()
        .iter()
        .map(|p| {
            peak = peak.max(p.close);
            (p.date, (p.close - peak) / peak)
        })
        .collect()
}

/// Price history rescaled so the first observation equals `base`.
pub fn rebase(prices: &PriceSeries, base: f64) -> Vec<(NaiveDate, f64)> {
    let Some(first) = prices.first() else {
        return Vec::new();
    };
    let scale = base / first.close;
    prices
        .points()
        .iter()
        .map(|p| (p.date, p.close * scale))
        .collect()
}

// --- Helpers ---

fn tail_threshold(returns: &ReturnSeries, confidence: f64, metric: &'static str) -> Result<f64, AnalyticsError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AnalyticsError::InvalidInput(
            "confidence",
            format!("must lie strictly between 0 and 1, got {confidence}"),
        ));
    }
    let sorted = sorted_copy(returns.values());
    quantile(&sorted, 1.0 - confidence).ok_or_else(|| AnalyticsError::insufficient(metric, 1, 0))
}

fn check_periods(periods_per_year: u32) -> Result<(), AnalyticsError> {
    if periods_per_year == 0 {
        return Err(AnalyticsError::InvalidInput(
            "periods per year",
            "must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (`n - 1` denominator).
pub(crate) fn sample_std_dev(values: &[f64], metric: &'static str) -> Result<f64, AnalyticsError> {
    if values.len() < 2 {
        return Err(AnalyticsError::insufficient(metric, 2, values.len()));
    }
    // A constant sample has no dispersion; the floating mean must not invent some.
    if values.iter().all(|&v| v == values[0]) {
        return Ok(0.0);
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Ok((sum_sq / (values.len() - 1) as f64).sqrt())
}
