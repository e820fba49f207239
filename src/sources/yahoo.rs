//! Yahoo Finance chart client.
//!
//! Fetches OHLCV bars for stocks, ETFs and futures from the public chart
//! endpoint. No API key required.

use super::MarketDataSource;
use crate::error::{AppError, Result};
use crate::types::Bar;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Normalize a symbol for Yahoo (BRK.B -> BRK-B).
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Convert a decoded chart response into bars.
///
/// Rows without a positive close are skipped. Missing open/high/low fall back
/// to the close, missing volume to zero.
fn into_bars(symbol: &str, response: ChartResponse) -> Result<Vec<Bar>> {
    if let Some(error) = response.chart.error {
        return Err(AppError::MarketData(format!(
            "{}: {} - {}",
            symbol, error.code, error.description
        )));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(AppError::DataUnavailable(symbol.to_string()));
    };
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let at = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();

    let bars: Vec<Bar> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = at(&quote.close, i).filter(|c| c.is_finite() && *c > 0.0)?;
            Some(Bar {
                time: ts * 1000,
                open: at(&quote.open, i).unwrap_or(close),
                high: at(&quote.high, i).unwrap_or(close),
                low: at(&quote.low, i).unwrap_or(close),
                close,
                volume: at(&quote.volume, i).unwrap_or(0.0),
            })
        })
        .collect();

    if bars.is_empty() {
        return Err(AppError::DataUnavailable(symbol.to_string()));
    }
    Ok(bars)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self { client })
    }
}

impl MarketDataSource for YahooFinanceClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    /// `lookback` is a Yahoo range ("1d", "5d", "1mo", "3mo", "1y", ...),
    /// `interval` a bar size ("1m", "5m", "1h", "1d", ...).
    async fn fetch_bars(&self, symbol: &str, lookback: &str, interval: &str) -> Result<Vec<Bar>> {
        let url = format!(
            "{}/{}?range={}&interval={}&includePrePost=false",
            CHART_URL,
            normalize_symbol(symbol),
            lookback,
            interval
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::MarketData(format!(
                "{}: HTTP {}",
                symbol,
                response.status()
            )));
        }

        let body: ChartResponse = response.json().await?;
        let bars = into_bars(symbol, body)?;
        debug!("Received {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }
}
