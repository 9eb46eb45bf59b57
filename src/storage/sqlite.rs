// SQLite persistence layer for reviews.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, params};
use serde::Serialize;

use crate::sentiment::{self, Sentiment};

/// A stored review. Immutable once created: rows are only ever inserted,
/// never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: i64,
    pub text: String,
    pub sentiment: Sentiment,
    pub created_at: String,
}

/// SQLite-backed append-only store for sentiment-tagged reviews.
pub struct ReviewStore {
    conn: Mutex<Connection>,
}

impl ReviewStore {
    /// Open (or create) a SQLite database at `path` and ensure the reviews
    /// table exists. Pass `":memory:"` for an ephemeral in-memory database
    /// (useful for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS reviews (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                text       TEXT NOT NULL,
                sentiment  TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection for the scope of one operation.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Classify `text`, stamp the current UTC time, and persist a new review
    /// row. Returns the full stored record, with the id SQLite assigned.
    /// AUTOINCREMENT keeps ids unique and strictly increasing, including
    /// across concurrent creates.
    pub fn create(&self, text: &str) -> Result<Review> {
        let sentiment = sentiment::classify(text);
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let conn = self.conn();
        conn.execute(
            "INSERT INTO reviews (text, sentiment, created_at) VALUES (?1, ?2, ?3)",
            params![text, sentiment.as_str(), created_at],
        )
        .context("failed to insert review")?;

        Ok(Review {
            id: conn.last_insert_rowid(),
            text: text.to_string(),
            sentiment,
            created_at,
        })
    }

    /// Load stored reviews in insertion order (id ascending), optionally
    /// restricted to a single sentiment.
    pub fn list(&self, filter: Option<Sentiment>) -> Result<Vec<Review>> {
        let conn = self.conn();

        let (sql, filter_params) = match filter {
            Some(sentiment) => (
                "SELECT id, text, sentiment, created_at FROM reviews
                 WHERE sentiment = ?1 ORDER BY id",
                vec![sentiment.as_str()],
            ),
            None => (
                "SELECT id, text, sentiment, created_at FROM reviews ORDER BY id",
                vec![],
            ),
        };

        let mut stmt = conn
            .prepare(sql)
            .context("failed to prepare list query")?;

        let reviews = stmt
            .query_map(rusqlite::params_from_iter(filter_params), |row| {
                let sentiment: String = row.get(2)?;
                Ok(Review {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    // Stored values come from Sentiment::as_str; anything
                    // else defaults to neutral.
                    sentiment: sentiment.parse().unwrap_or(Sentiment::Neutral),
                    created_at: row.get(3)?,
                })
            })
            .context("failed to query reviews")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map review rows")?;

        Ok(reviews)
    }

    /// Return the total number of stored reviews.
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))
            .context("failed to count reviews")?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: create a fresh in-memory store for each test.
    fn test_store() -> ReviewStore {
        ReviewStore::open(":memory:").expect("in-memory database should open")
    }

    #[test]
    fn open_creates_reviews_table() {
        let store = test_store();
        let conn = store.conn();

        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='reviews')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists);
    }

    #[test]
    fn open_is_idempotent() {
        let tmp_dir = std::env::temp_dir();
        let db_path = tmp_dir.join(format!("test_reviews_{}.db", std::process::id()));
        let db_path_str = db_path.to_str().unwrap();

        {
            let store = ReviewStore::open(db_path_str).unwrap();
            store.create("хорошо").unwrap();
        }

        // Re-opening must not recreate the table or lose rows.
        let store = ReviewStore::open(db_path_str).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(format!("{db_path_str}-wal"));
        let _ = std::fs::remove_file(format!("{db_path_str}-shm"));
    }

    #[test]
    fn create_returns_stored_record() {
        let store = test_store();
        let review = store.create("Это было хорошо").unwrap();

        assert_eq!(review.text, "Это было хорошо");
        assert_eq!(review.sentiment, Sentiment::Positive);
        assert!(review.id > 0);
        // ISO-8601 UTC timestamp
        assert!(review.created_at.contains('T'));
        assert!(review.created_at.ends_with('Z'));
    }

    #[test]
    fn create_assigns_strictly_increasing_ids() {
        let store = test_store();
        let first = store.create("один").unwrap();
        let second = store.create("два").unwrap();
        let third = store.create("три").unwrap();

        assert!(first.id < second.id);
        assert!(second.id < third.id);
    }

    #[test]
    fn list_returns_all_in_insertion_order() {
        let store = test_store();
        store.create("хорошо").unwrap();
        store.create("плохо").unwrap();
        store.create("нормально").unwrap();

        let reviews = store.list(None).unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].text, "хорошо");
        assert_eq!(reviews[1].text, "плохо");
        assert_eq!(reviews[2].text, "нормально");
        assert!(reviews[0].id < reviews[1].id && reviews[1].id < reviews[2].id);
    }

    #[test]
    fn list_filters_by_sentiment() {
        let store = test_store();
        store.create("Это было хорошо").unwrap();
        let negative = store.create("Это было плохо").unwrap();
        store.create("Нормально").unwrap();
        store.create("хорошо но плохо").unwrap();

        let negatives = store.list(Some(Sentiment::Negative)).unwrap();
        assert_eq!(negatives.len(), 1);
        assert_eq!(negatives[0], negative);

        // Filtered results are a subset of the unfiltered list.
        let all = store.list(None).unwrap();
        assert_eq!(all.len(), 4);
        assert!(negatives.iter().all(|r| all.contains(r)));
    }

    #[test]
    fn list_is_stable_across_repeated_reads() {
        let store = test_store();
        store.create("хорошо").unwrap();
        store.create("плохо").unwrap();

        let first = store.list(None).unwrap();
        let second = store.list(None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn list_returns_empty_vec_when_no_reviews() {
        let store = test_store();
        assert!(store.list(None).unwrap().is_empty());
        assert!(store.list(Some(Sentiment::Positive)).unwrap().is_empty());
    }

    #[test]
    fn count_tracks_creates() {
        let store = test_store();
        assert_eq!(store.count().unwrap(), 0);

        store.create("хорошо").unwrap();
        store.create("плохо").unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn stored_sentiment_round_trips_through_listing() {
        let store = test_store();
        store.create("Это было хорошо").unwrap();
        store.create("Это было плохо").unwrap();
        store.create("Нормально").unwrap();

        let reviews = store.list(None).unwrap();
        assert_eq!(reviews[0].sentiment, Sentiment::Positive);
        assert_eq!(reviews[1].sentiment, Sentiment::Negative);
        assert_eq!(reviews[2].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn created_at_timestamps_are_sortable() {
        let store = test_store();
        store.create("первый").unwrap();
        store.create("второй").unwrap();

        let reviews = store.list(None).unwrap();
        // RFC 3339 with fixed-width fields sorts lexicographically.
        assert!(reviews[0].created_at <= reviews[1].created_at);
    }
}
