//! Average True Range (ATR) indicator.

use super::rolling::rolling_mean;
use super::{Indicator, IndicatorId};
use crate::types::Bar;

/// ATR (Average True Range) indicator.
///
/// Measures volatility as the rolling mean of the true range:
/// TR = max(high - low, |high - prev_close|, |low - prev_close|)
///
/// The first bar has no previous close; its true range is high - low.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    /// True range of every bar.
    pub fn true_range(bars: &[Bar]) -> Vec<f64> {
        bars.iter()
            .enumerate()
            .map(|(i, current)| {
                let hl = current.high - current.low;
                match i.checked_sub(1).map(|p| bars[p].close) {
                    Some(prev_close) => {
                        let hc = (current.high - prev_close).abs();
                        let lc = (current.low - prev_close).abs();
                        hl.max(hc).max(lc)
                    }
                    None => hl,
                }
            })
            .collect()
    }

    /// ATR series for an arbitrary period.
    pub fn series(bars: &[Bar], period: usize) -> Vec<f64> {
        rolling_mean(&Self::true_range(bars), period)
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        "ATR (14)"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::Atr]
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        vec![(IndicatorId::Atr, Self::series(bars, self.period))]
    }
}
