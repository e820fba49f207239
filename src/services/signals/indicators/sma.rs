//! Simple Moving Average (SMA) indicator.

use super::rolling::rolling_mean;
use super::{closes, Indicator, IndicatorId};
use crate::types::Bar;

/// SMA (Simple Moving Average) indicator.
///
/// Arithmetic mean of the close over a trailing window. Undefined for the
/// first `period - 1` bars.
pub struct Sma {
    id: [IndicatorId; 1],
    period: usize,
}

impl Sma {
    pub fn new(id: IndicatorId, period: usize) -> Self {
        Self { id: [id], period }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        match self.period {
            20 => "SMA (20)",
            50 => "SMA (50)",
            200 => "SMA (200)",
            _ => "SMA",
        }
    }

    fn outputs(&self) -> &[IndicatorId] {
        &self.id
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<(IndicatorId, Vec<f64>)> {
        vec![(self.id[0], rolling_mean(&closes(bars), self.period))]
    }
}
