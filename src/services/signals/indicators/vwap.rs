//! Volume Weighted Average Price (VWAP) indicator.

use super::{Indicator, IndicatorId};
use crate::types::Bar;

/// VWAP (Volume Weighted Average Price) indicator.
///
/// Average price weighted by volume from the start of the series:
/// VWAP = Cumulative(TP * Volume) / Cumulative(Volume)
///
/// Undefined while cumulative volume is zero.
pub struct Vwap;

impl Indicator for Vwap {
    fn name(&self) -> &str {
        "VWAP"
    }

    fn outputs(&self) -> &[IndicatorId] {
        &[IndicatorId::Vwap]
    }

    fn warmup(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        let mut cum_tp_vol = 0.0;
        let mut cum_vol = 0.0;

        let values = bars
            .iter()
            .map(|bar| {
                cum_tp_vol += bar.typical_price() * bar.volume;
                cum_vol += bar.volume;
                if cum_vol > 0.0 {
                    cum_tp_vol / cum_vol
                } else {
                    f64::NAN
                }
            })
            .collect();

        vec![(IndicatorId::Vwap, values)]
    }
}
