//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Every indicator series is as long as the bar series
//! 2. RSI stays within [0, 100]
//! 3. Bollinger bands stay ordered
//! 4. Confidence is bounded and non-decreasing in |score|
//! 5. Evaluation never faults on well-formed bars

use proptest::prelude::*;
use signalforge::services::signals::{
    compute_indicators, confidence, generate_recommendation, IndicatorId,
};
use signalforge::{Bar, CfdParameters, Decision};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random-walk bars with consistent OHLC ordering.
fn arb_bars(max_len: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((-3.0..3.0_f64, 0.0..2.0_f64, 0.0..2.0_f64, 0.0..5000.0_f64), 1..max_len)
        .prop_map(|steps| {
            let mut close = 100.0_f64;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (step, up, down, volume))| {
                    let open = close;
                    close = (close + step).max(1.0);
                    Bar {
                        time: i as i64 * 60_000,
                        open,
                        high: open.max(close) + up,
                        low: (open.min(close) - down).max(0.5),
                        close,
                        volume: volume.round(),
                    }
                })
                .collect()
        })
}

// ── 1. Series length ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn indicator_lengths_match(bars in arb_bars(120)) {
        let set = compute_indicators(&bars);
        for (id, values) in set.iter() {
            prop_assert_eq!(values.len(), bars.len(), "{}", id);
        }
    }
}

// ── 2-3. Indicator ranges ────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_within_bounds(bars in arb_bars(120)) {
        let set = compute_indicators(&bars);
        for v in set.get(IndicatorId::Rsi).unwrap().iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(v), "RSI {}", v);
        }
    }

    #[test]
    fn bollinger_ordered(bars in arb_bars(120)) {
        let set = compute_indicators(&bars);
        let upper = set.get(IndicatorId::BbUpper).unwrap();
        let middle = set.get(IndicatorId::BbMiddle).unwrap();
        let lower = set.get(IndicatorId::BbLower).unwrap();
        for i in 0..bars.len() {
            if middle[i].is_nan() {
                continue;
            }
            prop_assert!(upper[i] >= middle[i]);
            prop_assert!(middle[i] >= lower[i]);
        }
    }
}

// ── 4. Confidence ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn confidence_bounded(score in -100.0..100.0_f64) {
        let c = confidence(score);
        prop_assert!((0.0..=100.0).contains(&c));
        prop_assert_eq!(c, confidence(-score));
    }

    #[test]
    fn confidence_monotone(a in 0.0..60.0_f64, b in 0.0..60.0_f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(confidence(lo) <= confidence(hi));
        prop_assert!(confidence(-lo) <= confidence(hi));
    }
}

// ── 5. Pipeline ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn evaluation_is_well_formed(bars in arb_bars(90)) {
        let rec = generate_recommendation(&bars, &CfdParameters::default()).unwrap();
        prop_assert!(!rec.is_fallback());
        prop_assert!(rec.total_score.is_finite());
        prop_assert!((0.0..=100.0).contains(&rec.confidence));
        if rec.decision == Decision::Hold {
            prop_assert_eq!(rec.stop_loss, 0.0);
            prop_assert_eq!(rec.cfd.profit_3pct, 0.0);
        }
    }
}
