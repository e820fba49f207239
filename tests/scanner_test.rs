/**
 * Scanner Tests
 *
 * Concurrent per-symbol evaluation against an in-process market-data source:
 * - One outcome per symbol
 * - Missing data surfaces as DataUnavailable
 * - Only BUY/SELL recommendations are persisted
 */

use signalforge::error::Result;
use signalforge::services::{RecommendationStore, Scanner};
use signalforge::sources::MarketDataSource;
use signalforge::{AppError, Bar, CfdParameters};
use std::collections::HashMap;
use std::sync::Arc;

struct FixedSource {
    bars: HashMap<String, Vec<Bar>>,
}

impl MarketDataSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_bars(&self, symbol: &str, _lookback: &str, _interval: &str) -> Result<Vec<Bar>> {
        match self.bars.get(symbol) {
            Some(bars) if !bars.is_empty() => Ok(bars.clone()),
            _ => Err(AppError::DataUnavailable(symbol.to_string())),
        }
    }
}

fn series(count: usize, base: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let close = base + (i as f64 * 0.4).sin() * 3.0;
            Bar {
                time: i as i64 * 60_000,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

fn flat(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| Bar {
            time: i as i64 * 60_000,
            open: 50.0,
            high: 50.0,
            low: 50.0,
            close: 50.0,
            volume: 500.0,
        })
        .collect()
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_one_outcome_per_symbol() {
    let mut bars = HashMap::new();
    bars.insert("AAA".to_string(), series(80, 100.0));
    bars.insert("BBB".to_string(), series(40, 20.0));
    bars.insert("EMPTY".to_string(), Vec::new());

    let scanner = Scanner::new(Arc::new(FixedSource { bars }), "3mo", "1m", CfdParameters::default());
    let outcomes = scanner.scan(&symbols(&["AAA", "BBB", "EMPTY", "MISSING"])).await;

    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        match outcome.symbol.as_str() {
            "AAA" | "BBB" => {
                let eval = outcome.evaluation.as_ref().unwrap();
                assert_eq!(eval.indicators.len(), outcome.bars.len());
                assert!(!eval.recommendation.is_fallback());
            }
            _ => {
                let err = outcome.evaluation.as_ref().unwrap_err();
                assert!(err.is_data_unavailable());
                assert!(outcome.bars.is_empty());
            }
        }
        assert!(outcome.stored_id.is_none());
    }
}

#[tokio::test]
async fn test_hold_is_not_persisted() {
    let mut bars = HashMap::new();
    bars.insert("FLAT".to_string(), flat(60));

    let store = Arc::new(RecommendationStore::new_in_memory().unwrap());
    let scanner = Scanner::new(Arc::new(FixedSource { bars }), "3mo", "1m", CfdParameters::default())
        .with_store(Arc::clone(&store));

    let outcomes = scanner.scan(&symbols(&["FLAT"])).await;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        outcomes[0].evaluation.as_ref().unwrap().recommendation.decision,
        signalforge::Decision::Hold
    );
    assert!(outcomes[0].stored_id.is_none());
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_actionable_results_are_persisted() {
    let mut bars = HashMap::new();
    for (i, symbol) in ["S1", "S2", "S3", "S4", "S5"].iter().enumerate() {
        bars.insert(symbol.to_string(), series(60 + i * 37, 100.0 + i as f64 * 10.0));
    }

    let store = Arc::new(RecommendationStore::new_in_memory().unwrap());
    let scanner = Scanner::new(Arc::new(FixedSource { bars }), "3mo", "1m", CfdParameters::default())
        .with_store(Arc::clone(&store));
    let outcomes = scanner.scan(&symbols(&["S1", "S2", "S3", "S4", "S5"])).await;

    let actionable = outcomes
        .iter()
        .filter(|o| {
            o.evaluation
                .as_ref()
                .map(|e| e.recommendation.decision.is_actionable())
                .unwrap_or(false)
        })
        .count();
    let stored = outcomes.iter().filter(|o| o.stored_id.is_some()).count();

    assert_eq!(stored, actionable);
    assert_eq!(store.count().unwrap(), actionable);
}

#[tokio::test]
async fn test_empty_symbol_list() {
    let scanner = Scanner::new(
        Arc::new(FixedSource { bars: HashMap::new() }),
        "3mo",
        "1m",
        CfdParameters::default(),
    );
    assert!(scanner.scan(&[]).await.is_empty());
}
