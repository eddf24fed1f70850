//! Binance klines ingestion with bounded retry.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use predict_core::error::IngestionError;
use predict_core::traits::BarSource;
use predict_core::types::Bar;

/// Retry policy for transient ingestion failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Hard attempt ceiling, including the first try.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Binance spot klines client.
///
/// Only transient failures (timeouts, rate limits, 5xx) are retried,
/// up to the policy's attempt ceiling. Exhaustion surfaces as a typed
/// error the caller treats as fatal for that instrument; the client
/// never substitutes a partial bar sequence.
pub struct BinanceClient {
    client: Client,
    base_url: String,
    interval: String,
    retry: RetryPolicy,
}

impl BinanceClient {
    /// Create a client against the public Binance API.
    pub fn new(interval: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://api.binance.com".to_string(),
            interval: interval.into(),
            retry,
        }
    }

    /// Override the base URL (for mirrors and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Single fetch attempt, no retry.
    async fn fetch_once(&self, symbol: &str, lookback: usize) -> Result<Vec<Bar>, IngestionError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        debug!(symbol, lookback, "fetching klines");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", self.interval.as_str()),
                ("limit", &lookback.to_string()),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(IngestionError::RateLimited);
        }
        if status.is_server_error() {
            return Err(IngestionError::ServerError {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(IngestionError::Rejected {
                status: status.as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| IngestionError::MalformedPayload(e.to_string()))?;

        parse_klines(&payload)
    }
}

#[async_trait]
impl BarSource for BinanceClient {
    async fn fetch_bars(&self, symbol: &str, lookback: usize) -> Result<Vec<Bar>, IngestionError> {
        with_retry(&self.retry, symbol, |_| self.fetch_once(symbol, lookback)).await
    }

    fn name(&self) -> &str {
        "binance"
    }
}

/// Drive an attempt up to the policy's ceiling.
///
/// Only transient errors are retried; a permanent error returns on the
/// attempt that produced it. Exhaustion yields `RetriesExhausted` with
/// the attempt count and the last underlying failure.
async fn with_retry<T, F, Fut>(
    retry: &RetryPolicy,
    symbol: &str,
    mut attempt_fn: F,
) -> Result<T, IngestionError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, IngestionError>>,
{
    let mut last_error: Option<IngestionError> = None;

    for attempt in 1..=retry.max_attempts {
        match attempt_fn(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                warn!(
                    symbol,
                    attempt,
                    max_attempts = retry.max_attempts,
                    error = %e,
                    "transient ingestion failure"
                );
                last_error = Some(e);
                if attempt < retry.max_attempts {
                    tokio::time::sleep(retry.delay).await;
                }
            }
            Err(e) => return Err(e),
        }
    }

    Err(IngestionError::RetriesExhausted {
        symbol: symbol.to_string(),
        attempts: retry.max_attempts,
        last: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    })
}

fn classify_request_error(error: reqwest::Error) -> IngestionError {
    if error.is_timeout() {
        IngestionError::Timeout
    } else {
        IngestionError::Network(error.to_string())
    }
}

/// Parse the klines payload: an array of arrays where index 0 is the
/// open-time millis and indices 1-5 hold open/high/low/close/volume as
/// decimal strings. Trailing columns are ignored.
fn parse_klines(payload: &Value) -> Result<Vec<Bar>, IngestionError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| IngestionError::MalformedPayload("expected top-level array".to_string()))?;

    let mut bars = Vec::with_capacity(rows.len());
    for row in rows {
        let fields = row
            .as_array()
            .filter(|f| f.len() >= 6)
            .ok_or_else(|| IngestionError::MalformedPayload("kline row too short".to_string()))?;

        let timestamp = fields[0]
            .as_i64()
            .ok_or_else(|| IngestionError::MalformedPayload("open time not an integer".to_string()))?;

        let mut prices = [0.0f64; 5];
        for (i, price) in prices.iter_mut().enumerate() {
            let field = &fields[i + 1];
            *price = field
                .as_str()
                .and_then(|s| s.parse::<f64>().ok())
                .or_else(|| field.as_f64())
                .ok_or_else(|| {
                    IngestionError::MalformedPayload(format!("bad numeric field at index {}", i + 1))
                })?;
        }

        bars.push(Bar::new(
            timestamp, prices[0], prices[1], prices[2], prices[3], prices[4],
        ));
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_klines_payload() {
        let payload = json!([
            [1700000000000i64, "100.5", "101.0", "99.5", "100.8", "1234.56", 0, "x", 1, "y", "z", "0"],
            [1700086400000i64, "100.8", "102.0", "100.0", "101.2", "2000.0", 0, "x", 1, "y", "z", "0"]
        ]);

        let bars = parse_klines(&payload).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp, 1700000000000);
        assert!((bars[0].open - 100.5).abs() < 1e-10);
        assert!((bars[1].close - 101.2).abs() < 1e-10);
        assert!((bars[1].volume - 2000.0).abs() < 1e-10);
    }

    #[test]
    fn test_parse_klines_rejects_short_row() {
        let payload = json!([[1700000000000i64, "100.5"]]);
        assert!(matches!(
            parse_klines(&payload),
            Err(IngestionError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_parse_klines_rejects_non_array() {
        let payload = json!({"code": -1121, "msg": "Invalid symbol."});
        assert!(matches!(
            parse_klines(&payload),
            Err(IngestionError::MalformedPayload(_))
        ));
    }

    fn no_delay(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_retry_exhaustion_after_transient_failures() {
        let calls = std::cell::Cell::new(0u32);
        let result: Result<Vec<Bar>, _> = with_retry(&no_delay(3), "BTCUSDT", |_| {
            calls.set(calls.get() + 1);
            async { Err(IngestionError::Timeout) }
        })
        .await;

        assert_eq!(calls.get(), 3);
        match result {
            Err(IngestionError::RetriesExhausted {
                symbol, attempts, ..
            }) => {
                assert_eq!(symbol, "BTCUSDT");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected RetriesExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_permanent_failure_is_never_retried() {
        let calls = std::cell::Cell::new(0u32);
        let result: Result<Vec<Bar>, _> = with_retry(&no_delay(3), "BTCUSDT", |_| {
            calls.set(calls.get() + 1);
            async { Err(IngestionError::MalformedPayload("not an array".to_string())) }
        })
        .await;

        assert_eq!(calls.get(), 1);
        assert!(matches!(result, Err(IngestionError::MalformedPayload(_))));

        let calls = std::cell::Cell::new(0u32);
        let result: Result<Vec<Bar>, _> = with_retry(&no_delay(3), "BTCUSDT", |_| {
            calls.set(calls.get() + 1);
            async { Err(IngestionError::Rejected { status: 400 }) }
        })
        .await;

        assert_eq!(calls.get(), 1);
        assert!(matches!(
            result,
            Err(IngestionError::Rejected { status: 400 })
        ));
    }

    #[tokio::test]
    async fn test_transient_failure_then_success() {
        let calls = std::cell::Cell::new(0u32);
        let result = with_retry(&no_delay(3), "BTCUSDT", |_| {
            calls.set(calls.get() + 1);
            let fail = calls.get() == 1;
            async move {
                if fail {
                    Err(IngestionError::ServerError { status: 503 })
                } else {
                    Ok(vec![Bar::new(1, 1.0, 2.0, 0.5, 1.5, 10.0)])
                }
            }
        })
        .await;

        assert_eq!(calls.get(), 2);
        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn test_transient_classification() {
        assert!(IngestionError::Timeout.is_transient());
        assert!(IngestionError::RateLimited.is_transient());
        assert!(IngestionError::ServerError { status: 503 }.is_transient());
        assert!(!IngestionError::Rejected { status: 400 }.is_transient());
        assert!(!IngestionError::MalformedPayload("bad".to_string()).is_transient());
    }
}
