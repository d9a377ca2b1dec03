use api_client::error::ApiError;
use api_client::{CachingProvider, CsvPriceStore, PriceSeriesProvider, YahooClient};
use std::sync::Arc;
use chrono::NaiveDate;
use core_types::PriceSeries;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const MSFT_CHART: &str = r#"{"chart":{"result":[{
    "meta":{"symbol":"MSFT","currency":"USD","gmtoffset":-18000},
    "timestamp":[1704205800,1704292200,1704378600,1704465000],
    "indicators":{"quote":[{"close":[370.87,370.60,367.94,367.75]}],
                  "adjclose":[{"adjclose":[368.1,367.8,365.2,365.0]}]}}],
    "error":null}}"#;

#[tokio::test]
async fn yahoo_client_fetches_daily_closes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/MSFT"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MSFT_CHART))
        .expect(1)
        .mount(&server)
        .await;

    let client = YahooClient::with_base_url(server.uri()).unwrap();
    let series = client
        .fetch_series("MSFT", date(2024, 1, 1), date(2024, 1, 6))
        .await
        .unwrap();

    assert_eq!(series.symbol(), "MSFT");
    assert_eq!(series.len(), 4);
    assert_eq!(series.first().unwrap().date, date(2024, 1, 2));
    assert_eq!(series.last().unwrap().close, 365.0);
}

#[tokio::test]
async fn yahoo_client_applies_end_exclusive_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MSFT_CHART))
        .mount(&server)
        .await;

    let client = YahooClient::with_base_url(server.uri()).unwrap();
    let series = client
        .fetch_series("MSFT", date(2024, 1, 3), date(2024, 1, 5))
        .await
        .unwrap();
    assert_eq!(series.dates(), vec![date(2024, 1, 3), date(2024, 1, 4)]);
}

#[tokio::test]
async fn yahoo_not_found_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        ))
        .mount(&server)
        .await;

    let client = YahooClient::with_base_url(server.uri()).unwrap();
    let err = client
        .fetch_series("NOPE", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Upstream(msg) if msg.contains("Not Found")));
}

#[tokio::test]
async fn yahoo_empty_range_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"chart":{"result":[{"meta":{"symbol":"AAPL"},"indicators":{"quote":[{}]}}],"error":null}}"#,
        ))
        .mount(&server)
        .await;

    let client = YahooClient::with_base_url(server.uri()).unwrap();
    let err = client
        .fetch_series("AAPL", date(2024, 1, 1), date(2024, 1, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmptySeries(symbol) if symbol == "AAPL"));
}

#[tokio::test]
async fn yahoo_garbage_body_fails_to_deserialize() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let client = YahooClient::with_base_url(server.uri()).unwrap();
    let err = client
        .fetch_series("AAPL", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Deserialization(_)));
}

#[tokio::test]
async fn csv_store_round_trips_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvPriceStore::new(dir.path().join("raw"));
    let series = PriceSeries::from_parts(
        "BTC-USD",
        &[date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)],
        &[42000.0, 44150.5, 42800.25],
    )
    .unwrap();

    let written = store.save(&series).await.unwrap();
    assert!(written.ends_with("BTC-USD.csv"));

    let all = store
        .fetch_series("BTC-USD", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .unwrap();
    assert_eq!(all, series);

    let tail = store
        .fetch_series("BTC-USD", date(2024, 1, 2), date(2024, 2, 1))
        .await
        .unwrap();
    assert_eq!(tail.closes(), vec![44150.5, 42800.25]);

    let err = store
        .fetch_series("BTC-USD", date(2025, 1, 1), date(2025, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmptySeries(_)));
}

#[tokio::test]
async fn csv_store_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvPriceStore::new(dir.path());
    let err = store
        .fetch_series("AAPL", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Io(_)));
}

#[tokio::test]
async fn csv_store_rejects_unordered_rows() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("AAPL.csv"),
        "date,close\n2024-01-03,10.0\n2024-01-02,11.0\n",
    )
    .unwrap();
    let store = CsvPriceStore::new(dir.path());
    let err = store
        .fetch_series("AAPL", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidSeries(_)));
}

#[tokio::test]
async fn caching_provider_mirrors_fetches_to_disk() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MSFT_CHART))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = CsvPriceStore::new(dir.path());
    let remote = Arc::new(YahooClient::with_base_url(server.uri()).unwrap());
    let provider = CachingProvider::new(remote, store.clone());

    let fetched = provider
        .fetch_series("MSFT", date(2024, 1, 1), date(2024, 1, 6))
        .await
        .unwrap();
    assert!(store.path_for("MSFT").exists());

    let cached = store
        .fetch_series("MSFT", date(2024, 1, 1), date(2024, 1, 6))
        .await
        .unwrap();
    assert_eq!(cached, fetched);
}
