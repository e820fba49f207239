//! On-Balance Volume (OBV) indicator.

use super::{Indicator, IndicatorId};
use crate::types::Bar;

/// OBV (On-Balance Volume) indicator.
///
/// Cumulative volume indicator over the whole series:
/// - If close > previous close: OBV += volume
/// - If close < previous close: OBV -= volume
/// - Unchanged close adds nothing; the first bar starts at 0.
pub struct Obv;

impl Indicator for Obv {
    fn name(&self) -> &str {
        "OBV"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::Obv]
    }

    fn warmup(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let mut obv = 0.0;
        let mut values = Vec::with_capacity(bars.len());

        for (i, bar) in bars.iter().enumerate() {
            if i > 0 {
                let prev_close = bars[i - 1].close;
                if bar.close > prev_close {
                    obv += bar.volume;
                } else if bar.close < prev_close {
                    obv -= bar.volume;
                }
            }
            values.push(obv);
        }

        vec![(IndicatorId::Obv, values)]
    }
}
