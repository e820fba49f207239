//! Relative Strength Index (RSI) indicator.

use super::rolling::{diff, rolling_mean};
use super::{closes, Indicator, IndicatorId};
use crate::types::Bar;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Average gain and loss are plain rolling means of the positive and negative
/// close-to-close deltas (no Wilder smoothing). Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// With no losses in the window RSI is 100; with neither gains nor losses it is
/// undefined.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// RSI from an average gain and average loss.
    pub fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_gain.is_nan() || avg_loss.is_nan() {
            return f64::NAN;
        }
        if avg_loss == 0.0 {
            return if avg_gain > 0.0 { 100.0 } else { f64::NAN };
        }

        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        "RSI (14)"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::Rsi]
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let deltas = diff(&closes(bars));

        // The first bar has no delta and counts as neither gain nor loss.
        let gains: Vec<f64> = deltas.iter().map(|d| if *d > 0.0 { *d } else { 0.0 }).collect();
        let losses: Vec<f64> = deltas.iter().map(|d| if *d < 0.0 { -*d } else { 0.0 }).collect();

        let avg_gain = rolling_mean(&gains, self.period);
        let avg_loss = rolling_mean(&losses, self.period);

        let rsi = avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(g, l)| Self::from_averages(*g, *l))
            .collect();

        vec![(IndicatorId::Rsi, rsi)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::fixtures::{downtrend, flat, uptrend, zigzag};

    fn last_rsi(bars: &[Bar]) -> f64 {
        let (_, values) = Rsi::default().compute(bars).remove(0);
        *values.last().unwrap()
    }

    #[test]
    fn test_rsi_name_and_warmup() {
        let rsi = Rsi::default();
        assert_eq!(rsi.name(), "RSI (14)");
        assert_eq!(rsi.warmup(), 14);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let (_, values) = Rsi::default().compute(&uptrend(10)).remove(0);
        assert!(values.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rsi_no_losses_is_100() {
        assert_eq!(last_rsi(&uptrend(50)), 100.0);
    }

    #[test]
    fn test_rsi_no_gains_is_0() {
        assert_eq!(last_rsi(&downtrend(50)), 0.0);
    }

    #[test]
    fn test_rsi_flat_is_undefined() {
        assert!(last_rsi(&flat(30, 100.0)).is_nan());
    }

    #[test]
    fn test_rsi_value_range() {
        let (_, values) = Rsi::default().compute(&zigzag(80)).remove(0);
        for v in values.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(v), "RSI out of range: {}", v);
        }
    }

    #[test]
    fn test_rsi_from_averages() {
        assert_eq!(Rsi::from_averages(1.0, 1.0), 50.0);
        assert_eq!(Rsi::from_averages(2.0, 0.0), 100.0);
        assert!(Rsi::from_averages(0.0, 0.0).is_nan());
        assert!((Rsi::from_averages(1.0, 3.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_rsi_custom_period() {
        let (_, values) = Rsi::new(7).compute(&zigzag(20)).remove(0);
        assert!(values[5].is_nan());
        assert!(values[6].is_finite());
    }
}
