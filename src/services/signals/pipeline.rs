//! End-to-end evaluation: bars in, recommendation out.

use super::aggregator::aggregate;
use super::indicators::{compute_indicators, IndicatorSeries};
use super::MarketSnapshot;
use crate::error::{AppError, Result};
use crate::types::{Bar, CfdParameters, Recommendation};
use tracing::{debug, warn};

/// Indicator series and the recommendation derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub indicators: IndicatorSeries,
    pub recommendation: Recommendation,
}

/// Compute indicators and a recommendation for a bar series.
///
/// An empty series is `DataUnavailable`. Any fault inside aggregation is
/// absorbed into the HOLD fallback, so this only fails on missing data.
pub fn evaluate(bars: &[Bar], params: &CfdParameters) -> Result<Evaluation> {
    if bars.is_empty() {
        return Err(AppError::DataUnavailable("empty bar series".to_string()));
    }

    if bars.iter().any(|b| !b.is_finite()) {
        warn!("Bar series contains non-finite values");
    }

    let indicators = compute_indicators(bars);
    let warming_up = indicators.warming_up();
    if !warming_up.is_empty() {
        debug!("{} indicators still warming up over {} bars", warming_up.len(), bars.len());
    }

    let snapshot = MarketSnapshot::new(bars, &indicators);
    let recommendation = match aggregate(&snapshot, params) {
        Ok(rec) => rec,
        Err(fault) => {
            warn!("Falling back to HOLD: {}", fault);
            Recommendation::fallback(fault.to_string())
        }
    };

    Ok(Evaluation {
        indicators,
        recommendation,
    })
}

/// Recommendation only, discarding the indicator series.
pub fn generate_recommendation(bars: &[Bar], params: &CfdParameters) -> Result<Recommendation> {
    evaluate(bars, params).map(|e| e.recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::fixtures;
    use crate::types::Decision;

    #[test]
    fn test_empty_is_data_unavailable() {
        let err = evaluate(&[], &CfdParameters::default()).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[test]
    fn test_fault_becomes_fallback() {
        let params = CfdParameters {
            position_size: -1.0,
            ..CfdParameters::default()
        };
        let rec = generate_recommendation(&fixtures::uptrend(30), &params).unwrap();
        assert!(rec.is_fallback());
        assert_eq!(rec.decision, Decision::Hold);
        assert_eq!(rec.entry_price, 0.0);
        assert_eq!(rec.confidence, 0.0);
    }

    #[test]
    fn test_single_bar_completes() {
        let eval = evaluate(&fixtures::uptrend(1), &CfdParameters::default()).unwrap();
        assert_eq!(eval.indicators.len(), 1);
        assert_eq!(eval.recommendation.entry_price, 101.0);
        assert!(!eval.recommendation.is_fallback());
    }
}
