//! Strength analyzer: ADX trend strength with DI direction.

use crate::services::signals::{exceeds, Analysis, Analyzer, IndicatorId, MarketSnapshot};
use crate::types::{StrengthSignals, TrendStrength};

/// ADX above 25 scores +/-1 by DI direction, above 20 scores +/-0.5,
/// anything weaker scores nothing.
pub struct Strength;

impl Analyzer for Strength {
    type Signals = StrengthSignals;

    const NAME: &'static str = "Strength";
    const WEIGHT: f64 = 1.0;
    const MAX_SCORE: f64 = 1.5;

    fn analyze(snapshot: &MarketSnapshot<'_>) -> Analysis<StrengthSignals> {
        let readings = (
            snapshot.latest(IndicatorId::Adx),
            snapshot.latest(IndicatorId::PlusDi),
            snapshot.latest(IndicatorId::MinusDi),
        );

        let (adx, plus_di, minus_di) = match readings {
            (Some(adx), Some(plus), Some(minus)) => (adx, plus, minus),
            _ => return Analysis::default(),
        };

        let trend_strength = TrendStrength::from_adx(adx);
        let (adx_direction, magnitude) = match trend_strength {
            TrendStrength::Strong => (exceeds(Some(plus_di), Some(minus_di)), 1.0),
            TrendStrength::Moderate => (exceeds(Some(plus_di), Some(minus_di)), 0.5),
            _ => (0, 0.0),
        };

        Analysis {
            score: magnitude * f64::from(adx_direction),
            signals: StrengthSignals {
                trend_strength,
                adx_direction,
            },
        }
    }
}
