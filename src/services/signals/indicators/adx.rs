//! Average Directional Index (ADX) indicator.

use super::atr::Atr;
use super::rolling::{diff, rolling_mean, safe_div};
use super::{Indicator, IndicatorId};
use crate::types::Bar;

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength (not direction):
/// - Below 20: Weak trend / ranging market
/// - 20-25: Moderate
/// - Above 25: Strong trend
///
/// Combined with +DI and -DI for direction. Directional movement is smoothed
/// with a plain rolling mean and divided by the rolling-mean ATR.
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Adx {
    /// +DM and -DM per bar. Only the larger, positive move counts.
    fn directional_movement(bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let up_moves = diff(&highs);
        let down_moves: Vec<f64> = diff(&lows).iter().map(|d| -d).collect();

        up_moves
            .iter()
            .zip(&down_moves)
            .map(|(&up, &down)| {
                let plus = if up > down && up > 0.0 { up } else { 0.0 };
                let minus = if down > up && down > 0.0 { down } else { 0.0 };
                (plus, minus)
            })
            .unzip()
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        "ADX (14)"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::Adx, IndicatorId::PlusDi, IndicatorId::MinusDi]
    }

    fn warmup(&self) -> usize {
        self.period * 2 - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let (plus_dm, minus_dm) = Self::directional_movement(bars);
        let atr = Atr::series(bars, self.period);
        let plus_dm = rolling_mean(&plus_dm, self.period);
        let minus_dm = rolling_mean(&minus_dm, self.period);

        let plus_di: Vec<f64> = plus_dm
            .iter()
            .zip(&atr)
            .map(|(dm, tr)| 100.0 * safe_div(*dm, *tr))
            .collect();
        let minus_di: Vec<f64> = minus_dm
            .iter()
            .zip(&atr)
            .map(|(dm, tr)| 100.0 * safe_div(*dm, *tr))
            .collect();

        let dx: Vec<f64> = plus_di
            .iter()
            .zip(&minus_di)
            .map(|(p, m)| 100.0 * safe_div((p - m).abs(), p + m))
            .collect();
        let adx = rolling_mean(&dx, self.period);

        vec![
            (IndicatorId::Adx, adx),
            (IndicatorId::PlusDi, plus_di),
            (IndicatorId::MinusDi, minus_di),
        ]
    }
}
