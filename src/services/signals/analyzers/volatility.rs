//! Volatility analyzer: Bollinger position and ATR regime.

use crate::services::signals::{Analysis, Analyzer, IndicatorId, MarketSnapshot};
use crate::types::{VolatilityLevel, VolatilitySignals};

/// Scores the close against the Bollinger bands and labels the ATR regime.
pub struct Volatility;

impl Volatility {
    fn band_position(close: f64, upper: f64, middle: f64, lower: f64) -> i8 {
        if close < lower {
            2
        } else if close < middle {
            1
        } else if close > upper {
            -2
        } else if close > middle {
            -1
        } else {
            0
        }
    }
}

impl Analyzer for Volatility {
    type Signals = VolatilitySignals;

    const NAME: &'static str = "Volatility";
    const WEIGHT: f64 = 1.0;
    const MAX_SCORE: f64 = 4.0;

    fn analyze(snapshot: &MarketSnapshot<'_>) -> Analysis<VolatilitySignals> {
        let close = snapshot.close();

        let bollinger_bands = match (
            close,
            snapshot.latest(IndicatorId::BbUpper),
            snapshot.latest(IndicatorId::BbMiddle),
            snapshot.latest(IndicatorId::BbLower),
        ) {
            (Some(c), Some(u), Some(m), Some(l)) => Self::band_position(c, u, m, l),
            _ => 0,
        };

        let volatility = match (snapshot.latest(IndicatorId::Atr), close) {
            (Some(atr), Some(price)) if price > 0.0 => {
                VolatilityLevel::from_atr_pct(atr / price * 100.0)
            }
            _ => VolatilityLevel::Unknown,
        };

        Analysis {
            score: f64::from(bollinger_bands),
            signals: VolatilitySignals {
                bollinger_bands,
                volatility,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::analyzers::fixtures::Scenario;

    fn bands(close: f64) -> Scenario {
        Scenario::with_closes(&[close])
            .set(IndicatorId::BbUpper, 110.0)
            .set(IndicatorId::BbMiddle, 100.0)
            .set(IndicatorId::BbLower, 90.0)
    }

    fn run(s: &Scenario) -> Analysis<VolatilitySignals> {
        Volatility::analyze(&MarketSnapshot::new(&s.bars, &s.indicators))
    }

    #[test]
    fn test_band_positions() {
        assert_eq!(run(&bands(85.0)).signals.bollinger_bands, 2);
        assert_eq!(run(&bands(95.0)).signals.bollinger_bands, 1);
        assert_eq!(run(&bands(100.0)).signals.bollinger_bands, 0);
        assert_eq!(run(&bands(105.0)).signals.bollinger_bands, -1);
        assert_eq!(run(&bands(115.0)).signals.bollinger_bands, -2);
        assert_eq!(run(&bands(115.0)).score, -2.0);
    }

    #[test]
    fn test_missing_bands_neutral() {
        let out = run(&Scenario::with_closes(&[100.0]));
        assert_eq!(out.signals.bollinger_bands, 0);
        assert_eq!(out.signals.volatility, VolatilityLevel::Unknown);
        assert_eq!(out.score, 0.0);
    }

    #[test]
    fn test_volatility_levels() {
        let level = |atr: f64| run(&bands(100.0).set(IndicatorId::Atr, atr)).signals.volatility;
        assert_eq!(level(6.0), VolatilityLevel::High);
        assert_eq!(level(3.0), VolatilityLevel::Medium);
        assert_eq!(level(1.0), VolatilityLevel::Low);
        assert_eq!(level(0.0), VolatilityLevel::Low);
    }

    #[test]
    fn test_non_positive_price_unknown() {
        let s = Scenario::with_closes(&[0.0]).set(IndicatorId::Atr, 1.0);
        assert_eq!(run(&s).signals.volatility, VolatilityLevel::Unknown);
    }
}
