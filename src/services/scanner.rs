//! Concurrent evaluation of a symbol list.

use crate::error::{AppError, Result};
use crate::services::recommendation_store::RecommendationStore;
use crate::services::signals::{evaluate, Evaluation};
use crate::sources::MarketDataSource;
use crate::types::{Bar, CfdParameters};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Result of evaluating one symbol.
#[derive(Debug)]
pub struct ScanOutcome {
    pub symbol: String,
    /// Bars the evaluation ran over (empty on fetch failure).
    pub bars: Vec<Bar>,
    pub evaluation: Result<Evaluation>,
    /// Row id when the recommendation was persisted.
    pub stored_id: Option<i64>,
}

/// Fetches bars for every symbol, evaluates them off the async runtime and
/// optionally persists actionable recommendations.
pub struct Scanner<S: MarketDataSource + 'static> {
    source: Arc<S>,
    store: Option<Arc<RecommendationStore>>,
    lookback: String,
    interval: String,
    params: CfdParameters,
}

impl<S: MarketDataSource + 'static> Scanner<S> {
    pub fn new(source: Arc<S>, lookback: &str, interval: &str, params: CfdParameters) -> Self {
        Self {
            source,
            store: None,
            lookback: lookback.to_string(),
            interval: interval.to_string(),
            params,
        }
    }

    /// Persist BUY and SELL recommendations to `store`.
    pub fn with_store(mut self, store: Arc<RecommendationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Evaluate every symbol concurrently. Outcomes arrive in completion
    /// order, one per symbol.
    pub async fn scan(&self, symbols: &[String]) -> Vec<ScanOutcome> {
        let mut tasks = JoinSet::new();

        for symbol in symbols {
            let symbol = symbol.clone();
            let source = Arc::clone(&self.source);
            let store = self.store.clone();
            let lookback = self.lookback.clone();
            let interval = self.interval.clone();
            let params = self.params;

            tasks.spawn(async move {
                let bars = match source.fetch_bars(&symbol, &lookback, &interval).await {
                    Ok(bars) => bars,
                    Err(e) => {
                        warn!("{}: fetch from {} failed: {}", symbol, source.name(), e);
                        return ScanOutcome {
                            symbol,
                            bars: Vec::new(),
                            evaluation: Err(e),
                            stored_id: None,
                        };
                    }
                };
                debug!("{}: {} bars from {}", symbol, bars.len(), source.name());

                let task_symbol = symbol.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    let evaluation = evaluate(&bars, &params);
                    let stored_id = match (&evaluation, &store) {
                        (Ok(eval), Some(store)) => persist(store, &task_symbol, eval),
                        _ => None,
                    };
                    (bars, evaluation, stored_id)
                })
                .await;

                match joined {
                    Ok((bars, evaluation, stored_id)) => ScanOutcome {
                        symbol,
                        bars,
                        evaluation,
                        stored_id,
                    },
                    Err(e) => ScanOutcome {
                        symbol,
                        bars: Vec::new(),
                        evaluation: Err(AppError::Internal(format!("evaluation task failed: {}", e))),
                        stored_id: None,
                    },
                }
            });
        }

        let mut outcomes = Vec::with_capacity(symbols.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!("Scan task aborted: {}", e),
            }
        }

        info!(
            "Scanned {} symbols, {} evaluated",
            symbols.len(),
            outcomes.iter().filter(|o| o.evaluation.is_ok()).count()
        );
        outcomes
    }
}

fn persist(store: &RecommendationStore, symbol: &str, eval: &Evaluation) -> Option<i64> {
    let rec = &eval.recommendation;
    if !rec.decision.is_actionable() {
        return None;
    }

    match store.add(symbol, rec, chrono::Utc::now().timestamp_millis()) {
        Ok(id) => {
            info!("{}: stored {} at {:.2} (id {})", symbol, rec.decision, rec.entry_price, id);
            Some(id)
        }
        Err(e) => {
            warn!("{}: failed to store recommendation: {}", symbol, e);
            None
        }
    }
}
