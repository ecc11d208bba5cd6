use quiz_core::model::{User, UserId};

use super::SqliteRepository;
use super::mapping::{id_to_i64, map_user_row, user_id_from_i64};
use crate::repository::{NewUserRecord, StorageError, UserRepository};

fn insert_err(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
    }
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO users (email, password_hash, created_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(insert_err)?;

        user_id_from_i64(res.last_insert_rowid())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_user_row).transpose()
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id_to_i64("user_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_user_row).transpose()
    }
}
