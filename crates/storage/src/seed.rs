//! One-time sample data seeding.
//!
//! Invoked explicitly at process startup, never per request. The sample set
//! is only inserted when the question store is empty, so reruns are no-ops.

use quiz_core::model::{
    Level, McqChoices, OptionKey, QuestionDraft, QuestionPayload, QuestionValidationError,
};
use thiserror::Error;

use crate::repository::{NewQuestionRecord, QuestionRepository, StorageError};

/// Errors surfaced while seeding sample questions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Validation(#[from] QuestionValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[allow(clippy::too_many_arguments)]
fn mcq(
    title: &str,
    body: &str,
    level: Level,
    role: &str,
    topic: &str,
    options: [&str; 4],
    correct: OptionKey,
    explanation: &str,
) -> QuestionDraft {
    QuestionDraft {
        title: title.to_string(),
        body: body.to_string(),
        level,
        role: role.to_string(),
        topic: topic.to_string(),
        company: "General".to_string(),
        payload: QuestionPayload::MultipleChoice {
            choices: McqChoices {
                a: options[0].to_string(),
                b: options[1].to_string(),
                c: options[2].to_string(),
                d: options[3].to_string(),
            },
            correct,
        },
        explanation: explanation.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn short(
    title: &str,
    body: &str,
    level: Level,
    role: &str,
    topic: &str,
    answer: &str,
    keyword: &str,
    explanation: &str,
) -> QuestionDraft {
    QuestionDraft {
        title: title.to_string(),
        body: body.to_string(),
        level,
        role: role.to_string(),
        topic: topic.to_string(),
        company: "General".to_string(),
        payload: QuestionPayload::ShortAnswer {
            answer: answer.to_string(),
            keyword: keyword.to_string(),
        },
        explanation: explanation.to_string(),
    }
}

/// The fixed sample question set inserted on first startup.
#[must_use]
pub fn sample_questions() -> Vec<QuestionDraft> {
    vec![
        mcq(
            "Two Sum (Array)",
            "Given an array and target, return indices of two numbers adding to target.",
            Level::Beginner,
            "SDE",
            "Arrays",
            [
                "Use two loops O(n^2)",
                "Use hash map to store complements O(n)",
                "Sort then two pointers O(n log n)",
                "Binary search for each element O(n log n)",
            ],
            OptionKey::B,
            "Use a dict value->index. For each x, check target-x in dict; else store x. O(n).",
        ),
        short(
            "SQL: Top N per group",
            "Select highest salary per department.",
            Level::Intermediate,
            "Data Analyst",
            "SQL",
            "window function",
            "dense_rank",
            "Use DENSE_RANK() OVER (PARTITION BY dept ORDER BY salary DESC)=1.",
        ),
        mcq(
            "REST: Idempotent methods",
            "Which HTTP methods are idempotent?",
            Level::Beginner,
            "Backend",
            "HTTP",
            [
                "GET, PUT, DELETE, HEAD, OPTIONS, TRACE",
                "POST only",
                "GET and POST",
                "PUT only",
            ],
            OptionKey::A,
            "Idempotent: GET, PUT, DELETE, HEAD, OPTIONS, TRACE; POST is not.",
        ),
        mcq(
            "Two Pointers: Pair Sum Sorted",
            "Given a sorted array and target, find any pair that sums to target.",
            Level::Beginner,
            "SDE",
            "Two Pointers",
            [
                "Nested loops O(n^2)",
                "Hash set O(n)",
                "Two pointers O(n)",
                "Binary search O(n log n)",
            ],
            OptionKey::C,
            "For sorted arrays, left+right pointer technique runs in O(n) and O(1) space.",
        ),
        short(
            "SQL: COUNT vs COUNT(*)",
            "Is COUNT(column) different from COUNT(*)? Explain.",
            Level::Beginner,
            "Data Analyst",
            "SQL",
            "count star",
            "null",
            "COUNT(*) counts rows; COUNT(col) skips NULL in that column.",
        ),
        mcq(
            "Backend: 201 for POST",
            "What status code for a resource created via POST?",
            Level::Beginner,
            "Backend",
            "HTTP",
            ["200 OK", "201 Created", "204 No Content", "409 Conflict"],
            OptionKey::B,
            "201 Created indicates a new resource was created; include Location header when applicable.",
        ),
    ]
}

/// Inserts the sample question set if the store holds no questions yet.
///
/// Returns the number of questions inserted (zero when the store was already
/// populated).
///
/// # Errors
///
/// Returns `SeedError` if a sample fails validation or the store rejects an
/// insert.
pub async fn seed_questions_if_empty(
    questions: &dyn QuestionRepository,
) -> Result<u32, SeedError> {
    if questions.count_questions().await? > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    for draft in sample_questions() {
        let validated = draft.validate()?;
        questions
            .insert_question(NewQuestionRecord::from_validated(&validated))
            .await?;
        inserted += 1;
    }
    Ok(inserted)
}
