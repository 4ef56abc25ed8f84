//! Market quote snapshot from the Yahoo Finance quoteSummary API.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

/// A single-point-in-time set of market fields for one ticker.
///
/// Immutable once fetched; the engines never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Stock symbol
    pub symbol: String,
    /// Current market price
    pub current_price: Option<f64>,
    /// Trailing twelve-month earnings per share
    pub trailing_eps: Option<f64>,
    /// Forward earnings per share
    pub forward_eps: Option<f64>,
    /// Annual dividend rate per share
    pub dividend_rate: Option<f64>,
    /// Shares outstanding
    pub shares_outstanding: Option<f64>,
    /// Market capitalization
    pub market_cap: Option<f64>,
    /// Latest trading volume
    pub volume: Option<f64>,
    /// Average trading volume
    pub average_volume: Option<f64>,
}

impl QuoteSnapshot {
    /// Create an empty snapshot for a symbol.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            current_price: None,
            trailing_eps: None,
            forward_eps: None,
            dividend_rate: None,
            shares_outstanding: None,
            market_cap: None,
            volume: None,
            average_volume: None,
        }
    }

    /// Market cap at the current price, preferring the provider figure and
    /// falling back to price × shares.
    pub fn market_cap_or_derived(&self) -> Option<f64> {
        self.market_cap.or_else(|| {
            Some(self.current_price? * self.shares_outstanding?)
        })
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetailModule>,
    default_key_statistics: Option<KeyStatisticsModule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    regular_market_price: Option<RawValue>,
    regular_market_volume: Option<RawValue>,
    market_cap: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    dividend_rate: Option<RawValue>,
    average_volume: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatisticsModule {
    trailing_eps: Option<RawValue>,
    forward_eps: Option<RawValue>,
    shares_outstanding: Option<RawValue>,
}

/// Yahoo wraps every numeric field as `{"raw": ..., "fmt": "..."}`.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

fn raw(value: Option<&RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

/// Yahoo Finance quote-snapshot provider.
#[derive(Debug)]
pub struct YahooQuoteProvider {
    client: reqwest::Client,
    rate_limit_delay: Duration,
}

impl YahooQuoteProvider {
    /// Create a new quote provider with default rate limiting (1 req/sec).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)")
                .build()
                .expect("Failed to create HTTP client"),
            rate_limit_delay: Duration::from_millis(1000),
        }
    }

    /// Fetch the current quote snapshot for a symbol.
    pub async fn fetch_snapshot(&self, symbol: &str) -> Result<QuoteSnapshot> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let url = format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{symbol}?modules=price,summaryDetail,defaultKeyStatistics"
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "Failed to fetch quote for {}: {}",
                symbol,
                response.status()
            )));
        }

        let body = response.text().await?;

        sleep(self.rate_limit_delay).await;

        parse_quote_summary(symbol, &body)
    }
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a quoteSummary response body into a [`QuoteSnapshot`].
pub fn parse_quote_summary(symbol: &str, body: &str) -> Result<QuoteSnapshot> {
    let response: QuoteSummaryResponse = serde_json::from_str(body)?;

    if let Some(error) = response.quote_summary.error {
        return Err(DataError::YahooApi(error.to_string()));
    }

    let result = response
        .quote_summary
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "No quoteSummary result returned".to_string(),
        })?;

    let mut snapshot = QuoteSnapshot::empty(symbol);

    if let Some(price) = &result.price {
        snapshot.current_price = raw(price.regular_market_price.as_ref());
        snapshot.volume = raw(price.regular_market_volume.as_ref());
        snapshot.market_cap = raw(price.market_cap.as_ref());
    }
    if let Some(detail) = &result.summary_detail {
        snapshot.dividend_rate = raw(detail.dividend_rate.as_ref());
        snapshot.average_volume = raw(detail.average_volume.as_ref());
    }
    if let Some(stats) = &result.default_key_statistics {
        snapshot.trailing_eps = raw(stats.trailing_eps.as_ref());
        snapshot.forward_eps = raw(stats.forward_eps.as_ref());
        snapshot.shares_outstanding = raw(stats.shares_outstanding.as_ref());
    }

    Ok(snapshot)
}
