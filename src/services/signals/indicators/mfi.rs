//! Money Flow Index (MFI) indicator.

use super::rolling::rolling_sum;
use super::{typical_prices, Indicator, IndicatorId};
use crate::types::Bar;

/// MFI (Money Flow Index) indicator.
///
/// Volume-weighted RSI:
/// - Raw Money Flow = Typical Price * Volume
/// - Positive flow when the typical price rose, negative when it fell
/// - MFI = 100 - 100 / (1 + positive / negative)
///
/// A window with no negative flow is undefined rather than 100.
pub struct Mfi {
    period: usize,
}

impl Default for Mfi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Mfi {
    /// MFI from summed positive and negative flow.
    fn from_flows(positive: f64, negative: f64) -> f64 {
        if positive.is_nan() || negative.is_nan() || negative == 0.0 {
            return f64::NAN;
        }
        let ratio = positive / negative;
        100.0 - (100.0 / (1.0 + ratio))
    }
}

impl Indicator for Mfi {
    fn name(&self) -> &str {
        "MFI (14)"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::Mfi]
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let tp = typical_prices(bars);
        let mut positive = vec![0.0; bars.len()];
        let mut negative = vec![0.0; bars.len()];

        for i in 1..bars.len() {
            let flow = tp[i] * bars[i].volume;
            if tp[i] > tp[i - 1] {
                positive[i] = flow;
            } else if tp[i] < tp[i - 1] {
                negative[i] = flow;
            }
        }

        let positive = rolling_sum(&positive, self.period);
        let negative = rolling_sum(&negative, self.period);
        let mfi = positive
            .iter()
            .zip(&negative)
            .map(|(p, n)| Self::from_flows(*p, *n))
            .collect();

        vec![(IndicatorId::Mfi, mfi)]
    }
}
