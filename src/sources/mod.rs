//! Market-data providers.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::Result;
use crate::types::Bar;
use std::future::Future;

/// Supplies a bar series for an instrument.
///
/// Implementations return `AppError::DataUnavailable` rather than an empty
/// series.
pub trait MarketDataSource: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Fetch bars covering `lookback` at `interval` resolution, oldest first.
    fn fetch_bars(
        &self,
        symbol: &str,
        lookback: &str,
        interval: &str,
    ) -> impl Future<Output = Result<Vec<Bar>>> + Send;
}
