//! Commodity Channel Index (CCI) indicator.

use super::rolling::{rolling_mad, rolling_mean, safe_div};
use super::{typical_prices, Indicator, IndicatorId};
use crate::types::Bar;

/// CCI (Commodity Channel Index) indicator.
///
/// Measures deviation of the typical price from its average:
/// CCI = (TP - SMA(TP)) / (0.015 * Mean Deviation)
///
/// Signals:
/// - Below -100: Oversold
/// - Above +100: Overbought
///
/// Zero mean deviation leaves CCI undefined.
pub struct Cci {
    period: usize,
}

impl Default for Cci {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Indicator for Cci {
    fn name(&self) -> &str {
        "CCI (20)"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::Cci]
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let tp = typical_prices(bars);
        let sma = rolling_mean(&tp, self.period);
        let mad = rolling_mad(&tp, self.period);

        let cci = (0..tp.len())
            .map(|i| safe_div(tp[i] - sma[i], 0.015 * mad[i]))
            .collect();

        vec![(IndicatorId::Cci, cci)]
    }
}
