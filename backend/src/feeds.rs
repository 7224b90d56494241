//! External market feeds: the KRW/USD exchange rate and ETF chart data.
//!
//! Both are best-effort public endpoints. The exchange rate gets a bounded
//! retry before the conversion is refused; chart data is proxied to clients
//! untouched, since the backend makes no correctness claims about it.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed unavailable: {0}")]
    Unavailable(String),

    #[error("feed returned a non-numeric value")]
    NotNumeric,

    #[error("no chart data for symbol {0}")]
    NoData(String),
}

/// Supplier of the current home-currency units per foreign unit.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rate(&self) -> Result<f64, FeedError>;
}

const RATE_ENDPOINT: &str = "https://m.search.naver.com/p/csearch/content/qapirender.nhn";
const RATE_RETRIES: usize = 2;

/// Live rate from the public currency-calculator endpoint.
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: RATE_ENDPOINT.to_string(),
        }
    }

    async fn fetch_once(&self) -> Result<f64, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("key", "calculator"),
                ("pkid", "141"),
                ("q", "환율"),
                ("where", "m"),
                ("u1", "keb"),
                ("u6", "standardUnit"),
                ("u7", "0"),
                ("u3", "USD"),
                ("u4", "KRW"),
                ("u8", "down"),
                ("u2", "1"),
            ])
            .send()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        body["country"][1]["value"]
            .as_str()
            .and_then(|s| s.replace(',', "").parse::<f64>().ok())
            .ok_or(FeedError::NotNumeric)
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rate(&self) -> Result<f64, FeedError> {
        let mut last_err = FeedError::NotNumeric;
        for attempt in 0..=RATE_RETRIES {
            match self.fetch_once().await {
                Ok(rate) => return Ok(rate),
                Err(e) => {
                    warn!("rate fetch attempt {} failed: {}", attempt + 1, e);
                    last_err = e;
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        }
        Err(last_err)
    }
}

/// Fixed rate, used by tests and the `EXCHANGE_RATE_OVERRIDE` knob.
pub struct FixedRateSource(pub f64);

#[async_trait]
impl RateSource for FixedRateSource {
    async fn fetch_rate(&self) -> Result<f64, FeedError> {
        Ok(self.0)
    }
}

const CHART_ENDPOINT: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const FIVE_YEARS_SECS: i64 = 86_400 * 365 * 5;

/// Fetch five years of daily chart data for `symbol`, as the provider
/// returns it.
pub async fn fetch_etf_chart(
    client: &reqwest::Client,
    symbol: &str,
) -> Result<serde_json::Value, FeedError> {
    let now = chrono::Utc::now().timestamp();
    let period1 = now - FIVE_YEARS_SECS;
    let url = format!("{CHART_ENDPOINT}/{symbol}?period1={period1}&period2={now}&interval=1d");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| FeedError::Unavailable(e.to_string()))?;
    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| FeedError::Unavailable(e.to_string()))?;

    if body["chart"]["result"][0].is_null() {
        return Err(FeedError::NoData(symbol.to_string()));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_source_returns_its_rate() {
        let source = FixedRateSource(1350.5);
        assert_eq!(source.fetch_rate().await.unwrap(), 1350.5);
    }
}
