//! Ledger repository backed by `SQLite`.

use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};

use super::model::{LedgerStats, ProcessedSubmission, SubmissionOutcome};
use crate::Result;

/// Repository of processed submissions.
pub struct TriageLedger {
    pool: SqlitePool,
}

impl TriageLedger {
    /// Create a new ledger with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let ledger = Self { pool };
        ledger.initialize().await?;
        Ok(ledger)
    }

    /// Create an in-memory ledger for testing and dry runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let ledger = Self { pool };
        ledger.initialize().await?;
        Ok(ledger)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS processed_messages (
                message_id TEXT NOT NULL,
                submission_type TEXT NOT NULL,
                sender TEXT NOT NULL,
                outcome TEXT NOT NULL,
                missing_count INTEGER NOT NULL DEFAULT 0,
                processed_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (message_id, submission_type)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_processed_messages_outcome
            ON processed_messages(submission_type, outcome)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns true if `message_id` was already handled for `submission_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn is_processed(&self, message_id: &str, submission_type: &str) -> Result<bool> {
        let row = sqlx::query(
            r"
            SELECT 1 FROM processed_messages
            WHERE message_id = ? AND submission_type = ?
            ",
        )
        .bind(message_id)
        .bind(submission_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Record a processed message, replacing any earlier record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn record(&self, submission: &ProcessedSubmission) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO processed_messages
                (message_id, submission_type, sender, outcome, missing_count)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(message_id, submission_type) DO UPDATE SET
                sender = excluded.sender,
                outcome = excluded.outcome,
                missing_count = excluded.missing_count,
                processed_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(&submission.message_id)
        .bind(&submission.submission_type)
        .bind(&submission.sender)
        .bind(submission.outcome.as_str())
        .bind(i64::from(submission.missing_count))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List processed messages with the given outcome, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_outcome(
        &self,
        outcome: SubmissionOutcome,
    ) -> Result<Vec<ProcessedSubmission>> {
        let rows = sqlx::query(
            r"
            SELECT message_id, submission_type, sender, outcome, missing_count, processed_at
            FROM processed_messages
            WHERE outcome = ?
            ORDER BY processed_at DESC, message_id
            ",
        )
        .bind(outcome.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_submission).collect())
    }

    /// Get counts of processed messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub async fn stats(&self) -> Result<LedgerStats> {
        let row = sqlx::query(
            r"
            SELECT
                COUNT(*) as total,
                COALESCE(SUM(CASE WHEN outcome = 'accepted' THEN 1 ELSE 0 END), 0) as accepted,
                COALESCE(SUM(CASE WHEN outcome = 'incomplete' THEN 1 ELSE 0 END), 0) as incomplete
            FROM processed_messages
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(LedgerStats {
            total: row.get::<i64, _>("total") as u32,
            accepted: row.get::<i64, _>("accepted") as u32,
            incomplete: row.get::<i64, _>("incomplete") as u32,
        })
    }
}

/// Convert a database row to a `ProcessedSubmission`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn row_to_submission(row: &SqliteRow) -> ProcessedSubmission {
    ProcessedSubmission {
        message_id: row.get("message_id"),
        submission_type: row.get("submission_type"),
        sender: row.get("sender"),
        outcome: SubmissionOutcome::parse(row.get::<&str, _>("outcome")),
        missing_count: row.get::<i64, _>("missing_count") as u32,
        processed_at: row.get("processed_at"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_and_lookup() {
        let ledger = TriageLedger::in_memory().await.unwrap();

        assert!(!ledger.is_processed("m1", "becas").await.unwrap());

        ledger
            .record(&ProcessedSubmission::new("m1", "becas", "ana@example.com", 0))
            .await
            .unwrap();

        assert!(ledger.is_processed("m1", "becas").await.unwrap());
        // Same message, other submission type
        assert!(!ledger.is_processed("m1", "pasantias").await.unwrap());
    }

    #[tokio::test]
    async fn test_record_replaces_previous() {
        let ledger = TriageLedger::in_memory().await.unwrap();

        ledger
            .record(&ProcessedSubmission::new("m1", "becas", "ana@example.com", 2))
            .await
            .unwrap();
        ledger
            .record(&ProcessedSubmission::new("m1", "becas", "ana@example.com", 0))
            .await
            .unwrap();

        let stats = ledger.stats().await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.incomplete, 0);
    }

    #[tokio::test]
    async fn test_list_by_outcome() {
        let ledger = TriageLedger::in_memory().await.unwrap();

        ledger
            .record(&ProcessedSubmission::new("m1", "becas", "a@example.com", 0))
            .await
            .unwrap();
        ledger
            .record(&ProcessedSubmission::new("m2", "becas", "b@example.com", 1))
            .await
            .unwrap();
        ledger
            .record(&ProcessedSubmission::new("m3", "becas", "c@example.com", 3))
            .await
            .unwrap();

        let incomplete = ledger
            .list_by_outcome(SubmissionOutcome::Incomplete)
            .await
            .unwrap();
        assert_eq!(incomplete.len(), 2);
        assert!(incomplete.iter().all(|s| s.missing_count > 0));
        assert!(incomplete.iter().all(|s| s.processed_at.is_some()));

        let accepted = ledger
            .list_by_outcome(SubmissionOutcome::Accepted)
            .await
            .unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].sender, "a@example.com");
    }

    #[tokio::test]
    async fn test_empty_stats() {
        let ledger = TriageLedger::in_memory().await.unwrap();
        assert_eq!(ledger.stats().await.unwrap(), LedgerStats::default());
    }
}
