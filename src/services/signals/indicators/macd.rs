//! MACD (Moving Average Convergence Divergence) indicator.

use super::rolling::ewm;
use super::{closes, Indicator, IndicatorId};
use crate::types::Bar;

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// All EMAs are seeded with their first input, so every line is defined from
/// the first bar.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        "MACD"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::Macd, IndicatorId::MacdSignal, IndicatorId::MacdHist]
    }

    fn warmup(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let closes = closes(bars);
        let fast = ewm(&closes, self.fast_period);
        let slow = ewm(&closes, self.slow_period);

        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ewm(&macd, self.signal_period);
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        vec![
            (IndicatorId::Macd, macd),
            (IndicatorId::MacdSignal, signal),
            (IndicatorId::MacdHist, histogram),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::fixtures::{downtrend, flat, uptrend};

    fn last(bars: &[Bar]) -> (f64, f64, f64) {
        let out = Macd::default().compute(bars);
        let pick = |i: usize| *out[i].1.last().unwrap();
        (pick(0), pick(1), pick(2))
    }

    #[test]
    fn test_macd_outputs() {
        let out = Macd::default().compute(&uptrend(5));
        let ids: Vec<IndicatorId> = out.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, Macd::default().outputs());
    }

    #[test]
    fn test_macd_flat_is_zero() {
        assert_eq!(last(&flat(40, 100.0)), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_macd_uptrend_bullish() {
        let (macd, signal, hist) = last(&uptrend(40));
        assert!(macd > 0.0);
        assert!(macd > signal);
        assert!(hist > 0.0);
    }

    #[test]
    fn test_macd_downtrend_bearish() {
        let (macd, signal, hist) = last(&downtrend(40));
        assert!(macd < 0.0);
        assert!(macd < signal);
        assert!(hist < 0.0);
    }

    #[test]
    fn test_histogram_identity() {
        let out = Macd::default().compute(&uptrend(30));
        for i in 0..30 {
            let expected = out[0].1[i] - out[1].1[i];
            assert_eq!(out[2].1[i], expected);
        }
    }
}
