//! Trading signals service module.
//!
//! Provides technical indicator calculations, the five signal analyzers,
//! weighted aggregation into a decision, and profit-target / CFD economics.
//! Everything here is a pure function of the bar series it is given.

pub mod aggregator;
pub mod analyzers;
pub mod indicators;
pub mod pipeline;
pub mod targets;

pub use aggregator::{aggregate, confidence, decide, ComputationFault, MAX_POSSIBLE_SCORE};
pub use indicators::{compute_indicators, IndicatorId, IndicatorSeries};
pub use pipeline::{evaluate, generate_recommendation, Evaluation};
pub use targets::{calculate_targets, TargetPlan};

use crate::types::Bar;

/// Read-only view of the latest market state handed to every analyzer.
#[derive(Debug, Clone, Copy)]
pub struct MarketSnapshot<'a> {
    bars: &'a [Bar],
    indicators: &'a IndicatorSeries,
}

impl<'a> MarketSnapshot<'a> {
    pub fn new(bars: &'a [Bar], indicators: &'a IndicatorSeries) -> Self {
        Self { bars, indicators }
    }

    pub fn bars(&self) -> &'a [Bar] {
        self.bars
    }

    pub fn indicators(&self) -> &'a IndicatorSeries {
        self.indicators
    }

    /// Latest close, if finite.
    pub fn close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close).filter(|c| c.is_finite())
    }

    /// Close of the bar before the latest one, if finite.
    pub fn previous_close(&self) -> Option<f64> {
        let i = self.bars.len().checked_sub(2)?;
        Some(self.bars[i].close).filter(|c| c.is_finite())
    }

    /// Latest defined value of an indicator.
    pub fn latest(&self, id: IndicatorId) -> Option<f64> {
        self.indicators.latest(id)
    }
}

/// Result of one analyzer: an unweighted partial score and its signal fragment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Analysis<S> {
    pub score: f64,
    pub signals: S,
}

/// Trait for implementing a signal analyzer.
///
/// Analyzers never fail: any undefined input yields the neutral value for the
/// affected sub-signal.
pub trait Analyzer {
    /// Signal fragment this analyzer owns.
    type Signals: Default;

    /// Human-readable name.
    const NAME: &'static str;

    /// Weight of the partial score in the total.
    const WEIGHT: f64;

    /// Largest partial-score magnitude used for confidence normalization.
    const MAX_SCORE: f64;

    fn analyze(snapshot: &MarketSnapshot<'_>) -> Analysis<Self::Signals>;
}

/// Sign of `a - b`, or 0 when either side is undefined or they are equal.
pub fn compare(a: Option<f64>, b: Option<f64>) -> i8 {
    match (a, b) {
        (Some(a), Some(b)) if a > b => 1,
        (Some(a), Some(b)) if a < b => -1,
        _ => 0,
    }
}

/// +1 when `a > b`, otherwise -1; 0 only when either side is undefined.
///
/// Ties count against the signal.
pub fn exceeds(a: Option<f64>, b: Option<f64>) -> i8 {
    match (a, b) {
        (Some(a), Some(b)) if a > b => 1,
        (Some(_), Some(_)) => -1,
        _ => 0,
    }
}

/// Mean of the last `window` values when all of them are finite.
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    if tail.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(tail.iter().sum::<f64>() / window as f64)
}
