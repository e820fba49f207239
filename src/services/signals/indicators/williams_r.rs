//! Williams %R indicator.

use super::rolling::{rolling_max, rolling_min, safe_div};
use super::{Indicator, IndicatorId};
use crate::types::Bar;

/// Williams %R.
///
/// %R = -100 * (Highest High - Close) / (Highest High - Lowest Low)
///
/// Ranges from -100 (close at the low) to 0 (close at the high). A flat range
/// leaves it undefined.
pub struct WilliamsR {
    period: usize,
}

impl Default for WilliamsR {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Indicator for WilliamsR {
    fn name(&self) -> &str {
        "Williams %R (14)"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::WilliamsR]
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let highest = rolling_max(&highs, self.period);
        let lowest = rolling_min(&lows, self.period);

        let values = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| -100.0 * safe_div(highest[i] - bar.close, highest[i] - lowest[i]))
            .collect();

        vec![(IndicatorId::WilliamsR, values)]
    }
}
