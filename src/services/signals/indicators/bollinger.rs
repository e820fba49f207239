//! Bollinger Bands indicator.

use super::rolling::{rolling_mean, rolling_std};
use super::{closes, Indicator, IndicatorId};
use crate::types::Bar;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// StdDev is the sample standard deviation of the close over the same window.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &str {
        "Bollinger Bands"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::BbUpper, IndicatorId::BbMiddle, IndicatorId::BbLower]
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let closes = closes(bars);
        let middle = rolling_mean(&closes, self.period);
        let std_dev = rolling_std(&closes, self.period);

        let upper = middle
            .iter()
            .zip(&std_dev)
            .map(|(m, s)| m + self.std_dev_multiplier * s)
            .collect();
        let lower = middle
            .iter()
            .zip(&std_dev)
            .map(|(m, s)| m - self.std_dev_multiplier * s)
            .collect();

        vec![
            (IndicatorId::BbUpper, upper),
            (IndicatorId::BbMiddle, middle),
            (IndicatorId::BbLower, lower),
        ]
    }
}
