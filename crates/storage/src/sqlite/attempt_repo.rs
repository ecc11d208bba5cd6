use quiz_core::model::{Attempt, AttemptId, UserId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{attempt_id_from_i64, id_to_i64, map_attempt_row};
use crate::repository::{AttemptRepository, NewAttemptRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

async fn count_where(
    repo: &SqliteRepository,
    sql: &str,
    user_id: UserId,
) -> Result<u64, StorageError> {
    let row = sqlx::query(sql)
        .bind(id_to_i64("user_id", user_id.value())?)
        .fetch_one(repo.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;
    let total: i64 = row.try_get("total").map_err(ser)?;
    Ok(u64::try_from(total).unwrap_or(0))
}

#[async_trait::async_trait]
impl AttemptRepository for SqliteRepository {
    async fn append_attempt(
        &self,
        attempt: &NewAttemptRecord,
    ) -> Result<AttemptId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO attempts (user_id, question_id, is_correct, submitted, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(id_to_i64("user_id", attempt.user_id.value())?)
        .bind(id_to_i64("question_id", attempt.question_id.value())?)
        .bind(attempt.is_correct)
        .bind(attempt.submitted.clone())
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        attempt_id_from_i64(res.last_insert_rowid())
    }

    async fn count_attempts(&self, user_id: UserId) -> Result<u64, StorageError> {
        count_where(
            self,
            "SELECT COUNT(*) AS total FROM attempts WHERE user_id = ?1",
            user_id,
        )
        .await
    }

    async fn count_correct_attempts(&self, user_id: UserId) -> Result<u64, StorageError> {
        count_where(
            self,
            "SELECT COUNT(*) AS total FROM attempts WHERE user_id = ?1 AND is_correct = 1",
            user_id,
        )
        .await
    }

    async fn recent_attempts(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<Attempt>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, question_id, is_correct, submitted, created_at
            FROM attempts
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            LIMIT ?2
            ",
        )
        .bind(id_to_i64("user_id", user_id.value())?)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut attempts = Vec::with_capacity(rows.len());
        for row in rows {
            attempts.push(map_attempt_row(&row)?);
        }
        Ok(attempts)
    }
}
