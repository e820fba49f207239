//! Stochastic Oscillator indicator.

use super::rolling::{rolling_max, rolling_mean, rolling_min, safe_div};
use super::{Indicator, IndicatorId};
use crate::types::Bar;

/// Stochastic Oscillator.
///
/// Compares closing price to price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
/// %D = SMA(3) of %K
///
/// A flat range leaves %K undefined.
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        "Stochastic"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::StochK, IndicatorId::StochD]
    }

    fn warmup(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let highest = rolling_max(&highs, self.k_period);
        let lowest = rolling_min(&lows, self.k_period);

        let k: Vec<f64> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| 100.0 * safe_div(bar.close - lowest[i], highest[i] - lowest[i]))
            .collect();
        let d = rolling_mean(&k, self.d_period);

        vec![(IndicatorId::StochK, k), (IndicatorId::StochD, d)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::fixtures::{downtrend, flat, uptrend, zigzag};

    fn last(bars: &[Bar]) -> (f64, f64) {
        let out = Stochastic::default().compute(bars);
        (*out[0].1.last().unwrap(), *out[1].1.last().unwrap())
    }

    #[test]
    fn test_stochastic_warmup() {
        let out = Stochastic::default().compute(&uptrend(20));
        assert!(out[0].1[12].is_nan());
        assert!(out[0].1[13].is_finite());
        assert!(out[1].1[14].is_nan());
        assert!(out[1].1[15].is_finite());
    }

    #[test]
    fn test_stochastic_uptrend_high() {
        let (k, _) = last(&uptrend(30));
        assert!(k > 80.0, "%K in uptrend should be > 80, got {}", k);
    }

    #[test]
    fn test_stochastic_downtrend_low() {
        let (k, _) = last(&downtrend(30));
        assert!(k < 20.0, "%K in downtrend should be < 20, got {}", k);
    }

    #[test]
    fn test_stochastic_flat_range_undefined() {
        let (k, d) = last(&flat(30, 50.0));
        assert!(k.is_nan());
        assert!(d.is_nan());
    }

    #[test]
    fn test_stochastic_range() {
        let out = Stochastic::default().compute(&zigzag(60));
        for v in out[0].1.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(v));
        }
    }
}
