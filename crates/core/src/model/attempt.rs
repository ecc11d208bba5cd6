use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{AttemptId, QuestionId, UserId};

/// One immutable record of a user's submission and its verdict.
///
/// Attempts form an append-only ledger: they are created exactly once per
/// answer submission and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: AttemptId,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub is_correct: bool,
    /// The submitted text as graded (trimmed at the input boundary).
    pub submitted: String,
    pub created_at: DateTime<Utc>,
}
