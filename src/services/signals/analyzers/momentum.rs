//! Momentum analyzer: oscillator readings.

use crate::services::signals::{Analysis, Analyzer, IndicatorId, MarketSnapshot};
use crate::types::MomentumSignals;

/// Scores six oscillators. Oversold readings are bullish, overbought bearish.
pub struct Momentum;

impl Momentum {
    /// RSI bands: <30 +2, <40 +1, >70 -2, >60 -1.
    fn rsi_signal(rsi: Option<f64>) -> i8 {
        match rsi {
            Some(v) if v < 30.0 => 2,
            Some(v) if v < 40.0 => 1,
            Some(v) if v > 70.0 => -2,
            Some(v) if v > 60.0 => -1,
            _ => 0,
        }
    }

    /// MACD above its signal with a positive histogram, or the mirror image.
    fn macd_signal(macd: Option<f64>, signal: Option<f64>, hist: Option<f64>) -> i8 {
        match (macd, signal, hist) {
            (Some(m), Some(s), Some(h)) if m > s && h > 0.0 => 1,
            (Some(m), Some(s), Some(h)) if m < s && h < 0.0 => -1,
            _ => 0,
        }
    }

    /// %K oversold and turning up, or overbought and turning down.
    fn stochastic_signal(k: Option<f64>, d: Option<f64>) -> i8 {
        match (k, d) {
            (Some(k), Some(d)) if k < 20.0 && k > d => 1,
            (Some(k), Some(d)) if k > 80.0 && k < d => -1,
            _ => 0,
        }
    }

    /// +1 below `low`, -1 above `high`.
    fn band_signal(value: Option<f64>, low: f64, high: f64) -> i8 {
        match value {
            Some(v) if v < low => 1,
            Some(v) if v > high => -1,
            _ => 0,
        }
    }
}

impl Analyzer for Momentum {
    type Signals = MomentumSignals;

    const NAME: &'static str = "Momentum";
    const WEIGHT: f64 = 2.0;
    const MAX_SCORE: f64 = 9.5;

    fn analyze(snapshot: &MarketSnapshot<'_>) -> Analysis<MomentumSignals> {
        let signals = MomentumSignals {
            rsi: Self::rsi_signal(snapshot.latest(IndicatorId::Rsi)),
            macd: Self::macd_signal(
                snapshot.latest(IndicatorId::Macd),
                snapshot.latest(IndicatorId::MacdSignal),
                snapshot.latest(IndicatorId::MacdHist),
            ),
            stochastic: Self::stochastic_signal(
                snapshot.latest(IndicatorId::StochK),
                snapshot.latest(IndicatorId::StochD),
            ),
            cci: Self::band_signal(snapshot.latest(IndicatorId::Cci), -100.0, 100.0),
            williams_r: Self::band_signal(snapshot.latest(IndicatorId::WilliamsR), -80.0, -20.0),
            mfi: Self::band_signal(snapshot.latest(IndicatorId::Mfi), 20.0, 80.0),
        };

        let score = f64::from(signals.rsi)
            + 1.5 * f64::from(signals.macd)
            + 1.5 * f64::from(signals.stochastic)
            + f64::from(signals.cci)
            + f64::from(signals.williams_r)
            + f64::from(signals.mfi);

        Analysis { score, signals }
    }
}
