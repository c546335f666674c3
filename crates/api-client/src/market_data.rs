// In crates/api-client/src/market_data.rs

use crate::{AggregatesResponse, Error, MarketDataClient, MarketDataProvider, Result, truncate_body};
use app_config::MarketDataSettings;
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use core_types::PriceSample;
use std::time::Duration;

impl MarketDataClient {
    /// Constructs a new MarketDataClient from MarketDataSettings.
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(MarketDataClient {
            http_client,
            api_key: settings.api_key.clone(),
            base_url: settings.rest_base_url.trim_end_matches('/').to_string(),
            multiplier: settings.multiplier,
            timespan: settings.timespan.clone(),
            lookback_minutes: settings.lookback_minutes,
            timeout,
        })
    }

    /// Fetches aggregate bars for `ticker` over the lookback window ending now.
    ///
    /// This corresponds to the
    /// `GET /v2/aggs/ticker/{ticker}/range/{multiplier}/{timespan}/{from}/{to}` endpoint.
    /// Bars are requested newest first so `limit` keeps the most recent ones.
    pub async fn get_aggregates(&self, ticker: &str, limit: usize) -> Result<Vec<PriceSample>> {
        let to = Utc::now();
        let from = to - TimeDelta::minutes(i64::from(self.lookback_minutes));

        let url = format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            self.base_url,
            ticker,
            self.multiplier,
            self.timespan,
            from.timestamp_millis(),
            to.timestamp_millis(),
        );
        let limit = limit.to_string();

        tracing::debug!(%url, ticker, limit = %limit, "Requesting aggregate bars");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("adjusted", "true"),
                ("sort", "desc"),
                ("limit", limit.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::from_request(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_request(e, self.timeout))?;

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        parse_aggregates(&body)
    }
}

#[async_trait]
impl MarketDataProvider for MarketDataClient {
    fn name(&self) -> &'static str {
        "PolygonAggregates"
    }

    async fn recent_samples(&self, ticker: &str, count: usize) -> Result<Vec<PriceSample>> {
        let mut samples = self.get_aggregates(ticker, count).await?;
        if samples.len() > count {
            samples.drain(..samples.len() - count);
        }
        tracing::info!(ticker, received = samples.len(), "Fetched recent price samples");
        Ok(samples)
    }
}

/// Parses an aggregates response body into samples ordered oldest first.
///
/// A provider error status or `error` field is an `ApiError`; a response with
/// no `results` is an empty series.
pub fn parse_aggregates(body: &str) -> Result<Vec<PriceSample>> {
    let response: AggregatesResponse = serde_json::from_str(body)?;

    let status = response.status.unwrap_or_default();
    if let Some(msg) = response.error {
        return Err(Error::ApiError { status, msg });
    }
    if matches!(status.as_str(), "ERROR" | "NOT_AUTHORIZED") {
        let msg = response.message.unwrap_or_else(|| "Unknown error".to_string());
        return Err(Error::ApiError { status, msg });
    }

    let mut samples: Vec<PriceSample> = response
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|raw| PriceSample {
            timestamp: raw.timestamp,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        })
        .collect();
    samples.sort_by_key(|s| s.timestamp);

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use std::collections::HashMap;

    fn settings(base_url: &str) -> MarketDataSettings {
        MarketDataSettings {
            api_key: "test-key".into(),
            ticker: "I:NDX".into(),
            rest_base_url: base_url.into(),
            multiplier: 1,
            timespan: "minute".into(),
            lookback_minutes: 60,
            bars: 14,
            timeout_secs: 5,
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", address)
    }

    /// Serves `count` bars newest first, honoring `limit`, only for the right key.
    async fn aggregates_handler(
        Path((ticker, _multiplier, _timespan, from, to)): Path<(String, u32, String, i64, i64)>,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        if params.get("apiKey").map(String::as_str) != Some("test-key") {
            return (StatusCode::UNAUTHORIZED, r#"{"status":"NOT_AUTHORIZED"}"#.to_string());
        }
        if ticker != "I:NDX" || from >= to || params.get("sort").map(String::as_str) != Some("desc") {
            return (StatusCode::BAD_REQUEST, "bad request".to_string());
        }
        let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(5000);
        let results: Vec<String> = (0..20)
            .rev()
            .take(limit)
            .map(|i| format!(r#"{{"t":{},"o":1,"h":1,"l":1,"c":{},"v":10}}"#, i * 60_000, 100 + i))
            .collect();
        (StatusCode::OK, format!(r#"{{"status":"OK","results":[{}]}}"#, results.join(",")))
    }

    #[test]
    fn parses_and_orders_bars_oldest_first() {
        let body = r#"{"status":"OK","resultsCount":2,"results":[
            {"t":120000,"o":2,"h":3,"l":1,"c":2.5,"v":7},
            {"t":60000,"o":1,"h":2,"l":0.5,"c":1.5,"v":5}
        ]}"#;
        let samples = parse_aggregates(body).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp, 60_000);
        assert_eq!(samples[0].close, 1.5);
        assert_eq!(samples[1].close, 2.5);
        assert_eq!(samples[1].volume, 7.0);
    }

    #[test]
    fn missing_results_is_an_empty_series() {
        let samples = parse_aggregates(r#"{"status":"OK","resultsCount":0}"#).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn provider_error_is_an_api_error() {
        let err = parse_aggregates(r#"{"status":"ERROR","error":"Unknown API Key"}"#).unwrap_err();
        assert!(matches!(err, Error::ApiError { ref msg, .. } if msg == "Unknown API Key"));

        let err = parse_aggregates(r#"{"status":"NOT_AUTHORIZED","message":"plan"}"#).unwrap_err();
        assert!(matches!(err, Error::ApiError { ref status, .. } if status == "NOT_AUTHORIZED"));
    }

    #[test]
    fn malformed_bar_is_a_deserialization_error() {
        let err = parse_aggregates(r#"{"status":"OK","results":[{"t":1,"o":1}]}"#).unwrap_err();
        assert!(matches!(err, Error::DeserializationFailed(_)));
    }

    #[tokio::test]
    async fn fetches_the_newest_bars_oldest_first() {
        let router = Router::new().route(
            "/v2/aggs/ticker/{ticker}/range/{multiplier}/{timespan}/{from}/{to}",
            get(aggregates_handler),
        );
        let base_url = serve(router).await;
        let client = MarketDataClient::new(&settings(&base_url)).unwrap();

        let samples = client.recent_samples("I:NDX", 14).await.unwrap();

        assert_eq!(samples.len(), 14);
        // Bars 6..=19 are the 14 newest of 20.
        assert_eq!(samples[0].close, 106.0);
        assert_eq!(samples[13].close, 119.0);
        assert!(samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let router = Router::new().route(
            "/v2/aggs/ticker/{ticker}/range/{multiplier}/{timespan}/{from}/{to}",
            get(aggregates_handler),
        );
        let base_url = serve(router).await;
        let mut settings = settings(&base_url);
        settings.api_key = "wrong".into();
        let client = MarketDataClient::new(&settings).unwrap();

        let err = client.recent_samples("I:NDX", 14).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 401, .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn transport_error_does_not_expose_the_api_key() {
        // Bind then drop to get a port with no listener.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let mut settings = settings(&format!("http://{address}"));
        settings.api_key = "SUPERSECRETKEY".into();
        let client = MarketDataClient::new(&settings).unwrap();

        let err = client.recent_samples("I:NDX", 14).await.unwrap_err();

        assert!(matches!(err, Error::RequestFailed(_)), "got {err:?}");
        assert!(!err.to_string().contains("SUPERSECRETKEY"), "leaked: {err}");
        assert!(!format!("{err:?}").contains("SUPERSECRETKEY"));
    }

    #[tokio::test]
    async fn slow_provider_is_a_timeout() {
        let router = Router::new().route(
            "/v2/aggs/ticker/{ticker}/range/{multiplier}/{timespan}/{from}/{to}",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                r#"{"status":"OK","results":[]}"#
            }),
        );
        let base_url = serve(router).await;
        let mut settings = settings(&base_url);
        settings.timeout_secs = 1;
        let client = MarketDataClient::new(&settings).unwrap();

        let err = client.recent_samples("I:NDX", 14).await.unwrap_err();

        assert!(matches!(err, Error::Timeout(d) if d == Duration::from_secs(1)), "got {err:?}");
    }
}
