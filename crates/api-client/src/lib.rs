use crate::error::ApiError;
use crate::responses::{ChartResponse, ChartResult};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use core_types::{PricePoint, PriceSeries};
use std::time::Duration;

pub mod csv_store;
pub mod error;
pub mod responses;

// --- Public API ---
pub use csv_store::{CachingProvider, CsvPriceStore};

/// The generic, abstract interface for a source of historical closing prices.
/// This trait is the contract the analysis pipeline uses, allowing the
/// underlying implementation (remote API, local files or a mock) to be swapped out.
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Fetches daily closes for `symbol` with `start <= date < end`.
    ///
    /// Implementations return a chronologically ordered series and report an
    /// empty range as `ApiError::EmptySeries` rather than an empty series.
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ApiError>;
}

pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// A concrete implementation of the `PriceSeriesProvider` for the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(YAHOO_BASE_URL)
    }

    /// Points the client at a different host, e.g. a mock server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            // The chart endpoint rejects requests without a browser-like agent.
            .user_agent("Mozilla/5.0 (compatible; vantage/0.1)")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PriceSeriesProvider for YahooClient {
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let period1 = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let period2 = end.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();

        tracing::debug!(symbol, %start, %end, "Requesting daily chart.");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        // Errors come back as a chart envelope too, usually with a 404.
        let chart: ChartResponse = serde_json::from_str(&text).map_err(|e| {
            if status.is_success() {
                ApiError::Deserialization(e.to_string())
            } else {
                ApiError::Upstream(format!("HTTP {status}: {text}"))
            }
        })?;

        if let Some(err) = chart.chart.error {
            return Err(ApiError::Upstream(format!("{}: {}", err.code, err.description)));
        }
        if !status.is_success() {
            return Err(ApiError::Upstream(format!("HTTP {status}")));
        }

        let result = chart
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ApiError::EmptySeries(symbol.to_string()))?;

        let points = parse_chart(&result)?;
        let points: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| p.date >= start && p.date < end)
            .collect();
        if points.is_empty() {
            return Err(ApiError::EmptySeries(symbol.to_string()));
        }

        let series = PriceSeries::new(symbol, points)?;
        tracing::debug!(symbol, points = series.len(), "Fetched daily chart.");
        Ok(series)
    }
}

/// Turns the columnar chart payload into dated closes.
///
/// Adjusted closes are preferred and raw closes are the fallback. Rows with a
/// missing close are dropped, as are repeated bars for a date already seen
/// (the API sometimes appends a live bar for the current session).
pub fn parse_chart(result: &ChartResult) -> Result<Vec<PricePoint>, ApiError> {
    let closes = result
        .indicators
        .adjclose
        .first()
        .map(|a| &a.adjclose)
        .filter(|a| !a.is_empty())
        .or_else(|| result.indicators.quote.first().map(|q| &q.close))
        .ok_or_else(|| ApiError::InvalidData("response has no close prices".to_string()))?;

    if closes.len() != result.timestamp.len() {
        return Err(ApiError::InvalidData(format!(
            "{} timestamps but {} closes",
            result.timestamp.len(),
            closes.len()
        )));
    }

    let mut points: Vec<PricePoint> = Vec::with_capacity(closes.len());
    for (&ts, close) in result.timestamp.iter().zip(closes) {
        let Some(close) = *close else {
            continue;
        };
        let date = DateTime::from_timestamp(ts + result.meta.gmtoffset, 0)
            .ok_or_else(|| ApiError::InvalidData(format!("Invalid timestamp: {ts}")))?
            .date_naive();
        if points.last().is_some_and(|last| last.date >= date) {
            continue;
        }
        points.push(PricePoint::new(date, close));
    }

    Ok(points)
}
