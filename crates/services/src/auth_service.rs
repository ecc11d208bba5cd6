use std::sync::Arc;

use quiz_core::model::{User, UserId, normalize_email};
use storage::repository::{NewUserRecord, StorageError, UserRepository};

use crate::Clock;
use crate::error::AuthError;

/// Registration and credential checks.
///
/// The caller supplies raw form input; emails are normalized (trimmed,
/// lowercased) before any lookup or insert. Session handling lives outside
/// the core: these operations only establish or verify an identity.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self { clock, users }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` when email or password is blank,
    /// `AuthError::EmailTaken` for a duplicate email, and
    /// `AuthError::Storage` if persistence fails.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        let user_id = self
            .users
            .insert_user(NewUserRecord {
                email,
                password_hash,
                created_at: self.clock.now(),
            })
            .await
            .map_err(|e| match e {
                // A concurrent registration can still hit the unique index.
                StorageError::Conflict => AuthError::EmailTaken,
                other => AuthError::Storage(other),
            })?;

        tracing::info!(user_id = %user_id, "registered new user");
        Ok(user_id)
    }

    /// Verify credentials and return the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for any mismatch, without
    /// indicating which field was wrong, or `AuthError::Storage` if the
    /// lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_user_by_email(&email).await? else {
            tracing::debug!("login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !bcrypt::verify(password, &user.password_hash)? {
            tracing::debug!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;
    use storage::repository::Storage;

    fn service() -> AuthService {
        AuthService::new(fixed_clock(), Storage::in_memory().users)
    }

    #[tokio::test]
    async fn register_then_login_roundtrips() {
        let auth = service();
        let id = auth.register(" Ada@Example.com ", "hunter2").await.unwrap();
        let user = auth.login("ada@example.com", "hunter2").await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let auth = service();
        let err = auth.register("   ", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
        let err = auth.register("ada@example.com", "").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = service();
        auth.register("ada@example.com", "pw").await.unwrap();
        let err = auth.register("ADA@example.com", "other").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let auth = service();
        auth.register("ada@example.com", "pw").await.unwrap();

        let wrong_pw = auth.login("ada@example.com", "nope").await.unwrap_err();
        let unknown = auth.login("ghost@example.com", "pw").await.unwrap_err();
        assert!(matches!(wrong_pw, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
    }
}
