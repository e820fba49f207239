//! SQLite history of generated recommendations.
//!
//! Append-only apart from eviction: every insert trims the table back to the
//! newest `MAX_RECORDS` rows.

use crate::error::{AppError, Result};
use crate::types::{Decision, Recommendation, RecommendationStats, StoredRecommendation};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Rows retained after each insert.
pub const MAX_RECORDS: usize = 100;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const SELECT_COLUMNS: &str = "SELECT id, timestamp, symbol, signal, entry_price, target_3, target_5,
        target_10, stop_loss, confidence, indicators
 FROM recommendations";

/// SQLite store for recommendation history.
pub struct RecommendationStore {
    conn: Mutex<Connection>,
}

impl RecommendationStore {
    /// Open (or create) a store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!("Recommendation store initialized");
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        debug!("In-memory recommendation store initialized");
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal("recommendation store lock poisoned".to_string()))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS recommendations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp INTEGER NOT NULL,
                symbol TEXT NOT NULL,
                signal TEXT NOT NULL,
                entry_price REAL NOT NULL,
                target_3 REAL NOT NULL,
                target_5 REAL NOT NULL,
                target_10 REAL NOT NULL,
                stop_loss REAL NOT NULL,
                confidence REAL NOT NULL,
                indicators TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_recommendations_timestamp
             ON recommendations(timestamp DESC)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_recommendations_symbol ON recommendations(symbol)",
            [],
        )?;

        Ok(())
    }

    /// Persist a recommendation and evict everything beyond the newest
    /// `MAX_RECORDS`. Returns the new row id.
    pub fn add(&self, symbol: &str, rec: &Recommendation, timestamp_ms: i64) -> Result<i64> {
        let indicators = serde_json::to_string(&rec.signals)?;
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO recommendations
             (timestamp, symbol, signal, entry_price, target_3, target_5, target_10,
              stop_loss, confidence, indicators)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                timestamp_ms,
                symbol,
                rec.decision.as_str(),
                rec.entry_price,
                rec.targets.target_3pct,
                rec.targets.target_5pct,
                rec.targets.target_10pct,
                rec.stop_loss,
                rec.confidence,
                indicators,
            ],
        )?;
        let id = conn.last_insert_rowid();

        let evicted = conn.execute(
            "DELETE FROM recommendations WHERE id NOT IN (
                SELECT id FROM recommendations ORDER BY timestamp DESC, id DESC LIMIT ?1
            )",
            params![MAX_RECORDS as i64],
        )?;
        if evicted > 0 {
            debug!("Evicted {} old recommendations", evicted);
        }

        Ok(id)
    }

    /// Most recent recommendations, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<StoredRecommendation>> {
        self.query(
            &format!("{} ORDER BY timestamp DESC, id DESC LIMIT ?1", SELECT_COLUMNS),
            params![limit as i64],
        )
    }

    /// Most recent recommendations for one symbol, newest first.
    pub fn by_symbol(&self, symbol: &str, limit: usize) -> Result<Vec<StoredRecommendation>> {
        self.query(
            &format!(
                "{} WHERE symbol = ?1 ORDER BY timestamp DESC, id DESC LIMIT ?2",
                SELECT_COLUMNS
            ),
            params![symbol, limit as i64],
        )
    }

    /// Every stored recommendation, newest first.
    pub fn all(&self) -> Result<Vec<StoredRecommendation>> {
        self.query(
            &format!("{} ORDER BY timestamp DESC, id DESC", SELECT_COLUMNS),
            [],
        )
    }

    /// Delete rows older than `days` before `now_ms`. Returns the count removed.
    pub fn clear_older_than(&self, days: i64, now_ms: i64) -> Result<usize> {
        let cutoff = now_ms - days * MILLIS_PER_DAY;
        let conn = self.lock()?;
        let count = conn.execute(
            "DELETE FROM recommendations WHERE timestamp < ?1",
            params![cutoff],
        )?;
        if count > 0 {
            info!("Cleared {} recommendations older than {} days", count, days);
        }
        Ok(count)
    }

    /// Counts per decision and mean confidence.
    pub fn statistics(&self) -> Result<RecommendationStats> {
        let conn = self.lock()?;
        let stats = conn.query_row(
            "SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN signal = 'BUY' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN signal = 'SELL' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN signal = 'HOLD' THEN 1 ELSE 0 END), 0),
                AVG(confidence)
             FROM recommendations",
            [],
            |row| {
                Ok(RecommendationStats {
                    total: row.get::<_, i64>(0)? as usize,
                    buy: row.get::<_, i64>(1)? as usize,
                    sell: row.get::<_, i64>(2)? as usize,
                    hold: row.get::<_, i64>(3)? as usize,
                    avg_confidence: row.get(4)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Number of stored rows.
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM recommendations", [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<StoredRecommendation>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, row_to_stored)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn row_to_stored(row: &Row<'_>) -> rusqlite::Result<StoredRecommendation> {
    let signal: String = row.get(3)?;
    let signal = Decision::from_str(&signal).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown signal {:?}", signal).into(),
        )
    })?;

    Ok(StoredRecommendation {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        symbol: row.get(2)?,
        signal,
        entry_price: row.get(4)?,
        target_3: row.get(5)?,
        target_5: row.get(6)?,
        target_10: row.get(7)?,
        stop_loss: row.get(8)?,
        confidence: row.get(9)?,
        indicators: row.get(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::calculate_targets;
    use crate::types::{CfdParameters, SignalMap};

    fn rec(decision: Decision, entry: f64, confidence: f64) -> Recommendation {
        let plan = calculate_targets(decision, entry, &CfdParameters::default());
        Recommendation {
            decision,
            entry_price: entry,
            targets: plan.targets,
            stop_loss: plan.stop_loss,
            confidence,
            total_score: 0.0,
            scores: Default::default(),
            signals: SignalMap::default(),
            cfd: plan.cfd,
        }
    }

    #[test]
    fn test_add_and_read_back() {
        let store = RecommendationStore::new_in_memory().unwrap();
        let id = store.add("GC=F", &rec(Decision::Buy, 100.0, 40.0), 1_000).unwrap();

        let rows = store.recent(10).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, id);
        assert_eq!(row.symbol, "GC=F");
        assert_eq!(row.signal, Decision::Buy);
        assert_eq!(row.timestamp, 1_000);
        assert!((row.target_3 - 103.0).abs() < 1e-9);
        assert!((row.stop_loss - 98.0).abs() < 1e-9);

        let signals: SignalMap = serde_json::from_str(&row.indicators).unwrap();
        assert_eq!(signals, SignalMap::default());
    }

    #[test]
    fn test_newest_first_and_by_symbol() {
        let store = RecommendationStore::new_in_memory().unwrap();
        store.add("AAPL", &rec(Decision::Buy, 100.0, 10.0), 1).unwrap();
        store.add("MSFT", &rec(Decision::Sell, 200.0, 20.0), 2).unwrap();
        store.add("AAPL", &rec(Decision::Sell, 110.0, 30.0), 3).unwrap();

        let recent = store.recent(2).unwrap();
        assert_eq!(recent[0].timestamp, 3);
        assert_eq!(recent[1].timestamp, 2);

        let aapl = store.by_symbol("AAPL", 10).unwrap();
        assert_eq!(aapl.len(), 2);
        assert!(aapl.iter().all(|r| r.symbol == "AAPL"));
        assert_eq!(store.all().unwrap().len(), 3);
    }

    #[test]
    fn test_eviction_keeps_newest() {
        let store = RecommendationStore::new_in_memory().unwrap();
        for i in 0..(MAX_RECORDS as i64 + 5) {
            store.add("GC=F", &rec(Decision::Buy, 100.0, 50.0), i).unwrap();
        }
        assert_eq!(store.count().unwrap(), MAX_RECORDS);
        let all = store.all().unwrap();
        assert_eq!(all.first().unwrap().timestamp, MAX_RECORDS as i64 + 4);
        assert_eq!(all.last().unwrap().timestamp, 5);
    }

    #[test]
    fn test_statistics() {
        let store = RecommendationStore::new_in_memory().unwrap();
        let empty = store.statistics().unwrap();
        assert_eq!(empty.total, 0);
        assert_eq!(empty.avg_confidence, None);

        store.add("A", &rec(Decision::Buy, 1.0, 20.0), 1).unwrap();
        store.add("A", &rec(Decision::Buy, 1.0, 40.0), 2).unwrap();
        store.add("A", &rec(Decision::Sell, 1.0, 60.0), 3).unwrap();
        store.add("A", &rec(Decision::Hold, 1.0, 0.0), 4).unwrap();

        let stats = store.statistics().unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.buy, 2);
        assert_eq!(stats.sell, 1);
        assert_eq!(stats.hold, 1);
        assert_eq!(stats.avg_confidence, Some(30.0));
    }

    #[test]
    fn test_clear_older_than() {
        let store = RecommendationStore::new_in_memory().unwrap();
        let now = 100 * MILLIS_PER_DAY;
        store.add("A", &rec(Decision::Buy, 1.0, 1.0), now - 10 * MILLIS_PER_DAY).unwrap();
        store.add("A", &rec(Decision::Buy, 1.0, 1.0), now - MILLIS_PER_DAY).unwrap();

        assert_eq!(store.clear_older_than(7, now).unwrap(), 1);
        assert_eq!(store.count().unwrap(), 1);
    }
}
