//! Exponential Moving Average (EMA) indicator.

use super::rolling::ewm;
use super::{closes, Indicator, IndicatorId};
use crate::types::Bar;

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices. Recursively defined with
/// smoothing factor 2 / (span + 1) and seeded with the first close, so it is
/// defined from the first bar on.
pub struct Ema {
    id: [IndicatorId; 1],
    span: usize,
}

impl Ema {
    pub fn new(id: IndicatorId, span: usize) -> Self {
        Self { id: [id], span }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        match self.span {
            12 => "EMA (12)",
            26 => "EMA (26)",
            _ => "EMA",
        }
    }

    fn outputs(&self) -> &[IndicatorId] {
        &self.id
    }

    fn warmup(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        vec![(self.id[0], ewm(&closes(bars), self.span))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::fixtures::uptrend;

    #[test]
    fn test_ema_never_nan() {
        let ema = Ema::new(IndicatorId::Ema12, 12);
        let (_, values) = ema.compute(&uptrend(5)).remove(0);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_ema_seed_is_first_close() {
        let ema = Ema::new(IndicatorId::Ema26, 26);
        let bars = uptrend(3);
        let (_, values) = ema.compute(&bars).remove(0);
        assert_eq!(values[0], bars[0].close);
    }

    #[test]
    fn test_ema_fast_leads_slow_in_uptrend() {
        let bars = uptrend(40);
        let (_, fast) = Ema::new(IndicatorId::Ema12, 12).compute(&bars).remove(0);
        let (_, slow) = Ema::new(IndicatorId::Ema26, 26).compute(&bars).remove(0);
        assert!(fast[39] > slow[39]);
        assert!(fast[39] < bars[39].close);
    }
}
