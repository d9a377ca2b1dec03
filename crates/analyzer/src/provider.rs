use api_client::error::ApiError;
use api_client::{CachingProvider, CsvPriceStore, PriceSeriesProvider, YahooClient};
use configuration::{DataSettings, DataSource};
use std::sync::Arc;

/// Builds the price provider selected by the `[data]` settings.
///
/// `Csv` reads `{data_dir}/{symbol}.csv`. `Yahoo` queries the chart API and,
/// when `cache_raw` is set, mirrors every history it fetches into `data_dir`.
pub fn provider_from_config(data: &DataSettings) -> Result<Arc<dyn PriceSeriesProvider>, ApiError> {
    let store = CsvPriceStore::new(&data.data_dir);
    let provider: Arc<dyn PriceSeriesProvider> = match data.source {
        DataSource::Csv => Arc::new(store),
        DataSource::Yahoo => {
            let client = Arc::new(YahooClient::with_base_url(&data.yahoo_base_url)?);
            if data.cache_raw {
                Arc::new(CachingProvider::new(client, store))
            } else {
                client
            }
        }
    };
    tracing::debug!(source = ?data.source, cache_raw = data.cache_raw, "Price provider ready.");
    Ok(provider)
}
