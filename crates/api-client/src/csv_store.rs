use crate::PriceSeriesProvider;
use crate::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{PricePoint, PriceSeries};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    close: f64,
}

/// A directory of `{symbol}.csv` files with `date,close` columns.
///
/// Serves as an offline `PriceSeriesProvider` and as the cache for histories
/// fetched from a remote provider.
#[derive(Debug, Clone)]
pub struct CsvPriceStore {
    dir: PathBuf,
}

impl CsvPriceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    /// Writes the full series to `{dir}/{symbol}.csv`, replacing any existing file.
    pub async fn save(&self, series: &PriceSeries) -> Result<PathBuf, ApiError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for point in series.points() {
            writer.serialize(CsvRow {
                date: point.date,
                close: point.close,
            })?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ApiError::Io(e.into_error()))?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(series.symbol());
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), points = series.len(), "Saved price history.");
        Ok(path)
    }
}

#[async_trait]
impl PriceSeriesProvider for CsvPriceStore {
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let bytes = tokio::fs::read(self.path_for(symbol)).await?;

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let mut points = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            if row.date >= start && row.date < end {
                points.push(PricePoint::new(row.date, row.close));
            }
        }

        if points.is_empty() {
            return Err(ApiError::EmptySeries(symbol.to_string()));
        }
        Ok(PriceSeries::new(symbol, points)?)
    }
}

/// Fetches from a remote provider and mirrors every fetched history into a
/// `CsvPriceStore`, so later runs can use the files offline.
#[derive(Clone)]
pub struct CachingProvider {
    remote: Arc<dyn PriceSeriesProvider>,
    store: CsvPriceStore,
}

impl CachingProvider {
    pub fn new(remote: Arc<dyn PriceSeriesProvider>, store: CsvPriceStore) -> Self {
        Self { remote, store }
    }
}

#[async_trait]
impl PriceSeriesProvider for CachingProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let series = self.remote.fetch_series(symbol, start, end).await?;
        // A failed write only costs the cache entry.
        if let Err(e) = self.store.save(&series).await {
            tracing::warn!(symbol, error = %e, "Could not cache price history.");
        }
        Ok(series)
    }
}
