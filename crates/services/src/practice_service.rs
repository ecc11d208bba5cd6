use std::sync::Arc;

use quiz_core::grading::grade;
use quiz_core::model::{Question, QuestionId, UserId};
use serde::Serialize;
use storage::repository::{AttemptRepository, NewAttemptRecord, QuestionRepository};

use crate::Clock;
use crate::error::PracticeError;

/// What the presentation layer renders after an answer is submitted: the
/// verdict, the graded submission, and the question (whose explanation is
/// now shown).
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub question: Question,
    pub submitted: String,
    pub correct: bool,
}

/// Grades submissions and appends them to the attempt ledger.
///
/// The acting user is always an explicit parameter; there is no ambient
/// current-user state.
#[derive(Clone)]
pub struct PracticeService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl PracticeService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            clock,
            questions,
            attempts,
        }
    }

    /// Grade a submission and record exactly one attempt for it.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::QuestionNotFound` for an unknown question id,
    /// or `PracticeError::Storage` if the ledger append fails.
    pub async fn submit_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        raw_submission: &str,
    ) -> Result<AnswerOutcome, PracticeError> {
        let question = self
            .questions
            .get_question(question_id)
            .await?
            .ok_or(PracticeError::QuestionNotFound)?;

        let submitted = raw_submission.trim().to_owned();
        let correct = grade(&question, &submitted);

        self.attempts
            .append_attempt(&NewAttemptRecord {
                user_id,
                question_id,
                is_correct: correct,
                submitted: submitted.clone(),
                created_at: self.clock.now(),
            })
            .await?;

        tracing::debug!(%user_id, %question_id, correct, "answer graded");

        Ok(AnswerOutcome {
            question,
            submitted,
            correct,
        })
    }
}
