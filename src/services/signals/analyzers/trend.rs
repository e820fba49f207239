//! Trend analyzer: moving-average structure.

use crate::services::signals::{compare, exceeds, Analysis, Analyzer, IndicatorId, MarketSnapshot};
use crate::types::TrendSignals;

/// Scores moving-average alignment:
/// - SMA(20) vs SMA(50): +/-1
/// - Close vs SMA(20): +/-0.5
/// - EMA(12) vs EMA(26): +/-1
pub struct Trend;

impl Analyzer for Trend {
    type Signals = TrendSignals;

    const NAME: &'static str = "Trend";
    const WEIGHT: f64 = 1.5;
    const MAX_SCORE: f64 = 2.5;

    fn analyze(snapshot: &MarketSnapshot<'_>) -> Analysis<TrendSignals> {
        let sma20 = snapshot.latest(IndicatorId::Sma20);

        let signals = TrendSignals {
            sma_crossover: compare(sma20, snapshot.latest(IndicatorId::Sma50)),
            price_vs_sma20: exceeds(snapshot.close(), sma20),
            ema_alignment: exceeds(
                snapshot.latest(IndicatorId::Ema12),
                snapshot.latest(IndicatorId::Ema26),
            ),
        };

        let score = f64::from(signals.sma_crossover)
            + 0.5 * f64::from(signals.price_vs_sma20)
            + f64::from(signals.ema_alignment);

        Analysis { score, signals }
    }
}
