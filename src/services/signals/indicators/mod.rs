//! Technical indicator implementations.
//!
//! Each indicator maps a bar series to one or more derived series of the same
//! length, NaN-padded while warming up.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod vwap;
pub mod williams_r;

pub use adx::Adx;
pub use atr::Atr;
pub use bollinger::BollingerBands;
pub use cci::Cci;
pub use ema::Ema;
pub use macd::Macd;
pub use mfi::Mfi;
pub use obv::Obv;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use vwap::Vwap;
pub use williams_r::WilliamsR;

use crate::types::Bar;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Identifier of a derived indicator series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorId {
    Sma20,
    Sma50,
    Sma200,
    Ema12,
    Ema26,
    Rsi,
    Macd,
    MacdSignal,
    MacdHist,
    BbUpper,
    BbMiddle,
    BbLower,
    StochK,
    StochD,
    Atr,
    Obv,
    Adx,
    PlusDi,
    MinusDi,
    Cci,
    WilliamsR,
    Mfi,
    Vwap,
}

impl IndicatorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorId::Sma20 => "SMA_20",
            IndicatorId::Sma50 => "SMA_50",
            IndicatorId::Sma200 => "SMA_200",
            IndicatorId::Ema12 => "EMA_12",
            IndicatorId::Ema26 => "EMA_26",
            IndicatorId::Rsi => "RSI",
            IndicatorId::Macd => "MACD",
            IndicatorId::MacdSignal => "MACD_signal",
            IndicatorId::MacdHist => "MACD_hist",
            IndicatorId::BbUpper => "BB_upper",
            IndicatorId::BbMiddle => "BB_middle",
            IndicatorId::BbLower => "BB_lower",
            IndicatorId::StochK => "Stoch_K",
            IndicatorId::StochD => "Stoch_D",
            IndicatorId::Atr => "ATR",
            IndicatorId::Obv => "OBV",
            IndicatorId::Adx => "ADX",
            IndicatorId::PlusDi => "Plus_DI",
            IndicatorId::MinusDi => "Minus_DI",
            IndicatorId::Cci => "CCI",
            IndicatorId::WilliamsR => "Williams_R",
            IndicatorId::Mfi => "MFI",
            IndicatorId::Vwap => "VWAP",
        }
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Series this indicator produces.
    fn outputs(&self) -> &[IndicatorId];

    /// Number of bars needed before every output has a defined latest value.
    fn warmup(&self) -> usize;

    /// Compute all output series. Each has the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)>;
}

/// Get all available indicators.
pub fn all_indicators() -> Vec<Box<dyn Indicator>> {
    vec![
        // Trend indicators
        Box::new(Sma::new(IndicatorId::Sma20, 20)),
        Box::new(Sma::new(IndicatorId::Sma50, 50)),
        Box::new(Sma::new(IndicatorId::Sma200, 200)),
        Box::new(Ema::new(IndicatorId::Ema12, 12)),
        Box::new(Ema::new(IndicatorId::Ema26, 26)),
        Box::new(Macd::default()),
        Box::new(Adx::default()),
        // Momentum indicators
        Box::new(Rsi::default()),
        Box::new(Stochastic::default()),
        Box::new(Cci::default()),
        Box::new(WilliamsR::default()),
        Box::new(Mfi::default()),
        // Volatility indicators
        Box::new(BollingerBands::default()),
        Box::new(Atr::default()),
        // Volume indicators
        Box::new(Obv),
        Box::new(Vwap),
    ]
}

/// Named indicator series aligned with the bar series they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSeries {
    len: usize,
    series: BTreeMap<IndicatorId, Vec<f64>>,
}

impl IndicatorSeries {
    /// Create an empty set for a bar series of length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            series: BTreeMap::new(),
        }
    }

    /// Insert a series. Its length must match the bar series.
    pub fn insert(&mut self, id: IndicatorId, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.len, "{} length mismatch", id);
        self.series.insert(id, values);
    }

    /// Length of the underlying bar series.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Full series for an indicator.
    pub fn get(&self, id: IndicatorId) -> Option<&[f64]> {
        self.series.get(&id).map(Vec::as_slice)
    }

    /// Latest value, or None while the indicator is undefined.
    pub fn latest(&self, id: IndicatorId) -> Option<f64> {
        self.get(id)
            .and_then(|values| values.last().copied())
            .filter(|v| v.is_finite())
    }

    /// Indicators whose latest value is still undefined.
    pub fn warming_up(&self) -> Vec<IndicatorId> {
        self.series
            .keys()
            .copied()
            .filter(|id| self.latest(*id).is_none())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorId, &[f64])> {
        self.series.iter().map(|(id, v)| (*id, v.as_slice()))
    }
}

/// Run every indicator over the bar series.
pub fn compute_indicators(bars: &[Bar]) -> IndicatorSeries {
    let mut out = IndicatorSeries::new(bars.len());

    for indicator in all_indicators() {
        if bars.len() < indicator.warmup() {
            debug!(
                "Insufficient history for {}: {} bars, needs {}",
                indicator.name(),
                bars.len(),
                indicator.warmup()
            );
        }
        for (id, values) in indicator.compute(bars) {
            out.insert(id, values);
        }
    }

    out
}

/// Close prices of a bar series.
pub(crate) fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Typical prices of a bar series.
pub(crate) fn typical_prices(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(Bar::typical_price).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::Bar;

    pub fn uptrend(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                Bar {
                    time: 1_000_000 + i as i64 * 60_000,
                    open: base,
                    high: base + 2.0,
                    low: base - 1.0,
                    close: base + 1.0,
                    volume: 1000.0,
                }
            })
            .collect()
    }

    pub fn downtrend(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let base = 200.0 - i as f64 * 1.5;
                Bar {
                    time: 1_000_000 + i as i64 * 60_000,
                    open: base,
                    high: base + 1.0,
                    low: base - 2.0,
                    close: base - 1.0,
                    volume: 1000.0,
                }
            })
            .collect()
    }

    /// Rising drift with alternating up and down closes, so every indicator
    /// sees both gains and losses.
    pub fn zigzag(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let swing = if i % 2 == 0 { 1.0 } else { -1.0 };
                let close = 100.0 + i as f64 * 0.5 + swing;
                Bar {
                    time: 1_000_000 + i as i64 * 60_000,
                    open: close - swing,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1000.0 + (i % 7) as f64 * 100.0,
                }
            })
            .collect()
    }

    pub fn flat(count: usize, price: f64) -> Vec<Bar> {
        (0..count)
            .map(|i| Bar {
                time: 1_000_000 + i as i64 * 60_000,
                open: price,
                high: price,
                low: price,
                close: price,
                volume: 1000.0,
            })
            .collect()
    }
}
