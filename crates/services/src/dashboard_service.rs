use std::sync::Arc;

use quiz_core::model::{Attempt, UserId};
use quiz_core::stats::accuracy_percent;
use serde::Serialize;
use storage::repository::AttemptRepository;

use crate::error::DashboardError;

/// How many recent attempts the dashboard shows.
pub const RECENT_ATTEMPTS_LIMIT: u32 = 10;

/// Aggregated practice statistics for one user.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total: u64,
    pub correct: u64,
    /// Percentage, one decimal place; `0.0` when there are no attempts.
    pub accuracy: f64,
    /// Most recent attempts, newest first.
    pub recent: Vec<Attempt>,
}

/// Per-user aggregation over the attempt ledger.
#[derive(Clone)]
pub struct DashboardService {
    attempts: Arc<dyn AttemptRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    /// Compute the dashboard summary for the given user.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if repository access fails.
    pub async fn summary(&self, user_id: UserId) -> Result<DashboardSummary, DashboardError> {
        let total = self.attempts.count_attempts(user_id).await?;
        let correct = self.attempts.count_correct_attempts(user_id).await?;
        let recent = self
            .attempts
            .recent_attempts(user_id, RECENT_ATTEMPTS_LIMIT)
            .await?;

        Ok(DashboardSummary {
            total,
            correct,
            accuracy: accuracy_percent(correct, total),
            recent,
        })
    }
}
