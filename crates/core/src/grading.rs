//! Answer grading.
//!
//! Stateless, type-specific correctness rules:
//!
//! - multiple-choice: the submission must equal the stored correct option
//!   key exactly (case-sensitive),
//! - short answer: the submission matches the canonical answer
//!   case-insensitively, OR contains the keyword as a case-insensitive
//!   substring. Submitting just the keyword alone passes; that leniency is
//!   intentional and must not be tightened.
//!
//! The submission is whitespace-trimmed before evaluation. Recording the
//! attempt is the caller's job, not this module's.

use crate::model::{Question, QuestionPayload};

/// Grades a raw submission against a question and returns the verdict.
#[must_use]
pub fn grade(question: &Question, submitted: &str) -> bool {
    let submitted = submitted.trim();
    match &question.payload {
        QuestionPayload::MultipleChoice { correct, .. } => submitted == correct.as_str(),
        QuestionPayload::ShortAnswer { answer, keyword } => {
            let lowered = submitted.to_lowercase();
            let exact = lowered == answer.to_lowercase();
            let has_keyword = !keyword.is_empty() && lowered.contains(&keyword.to_lowercase());
            exact || has_keyword
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, McqChoices, OptionKey, QuestionDraft, QuestionId};

    fn build(payload: QuestionPayload) -> Question {
        QuestionDraft {
            title: "Q".to_string(),
            body: "B".to_string(),
            level: Level::Beginner,
            role: "SDE".to_string(),
            topic: "Arrays".to_string(),
            company: "General".to_string(),
            payload,
            explanation: String::new(),
        }
        .validate()
        .unwrap()
        .assign_id(QuestionId::new(1))
    }

    fn two_sum_mcq() -> Question {
        build(QuestionPayload::MultipleChoice {
            choices: McqChoices {
                a: "Use two loops O(n^2)".to_string(),
                b: "Use hash map to store complements O(n)".to_string(),
                c: "Sort then two pointers O(n log n)".to_string(),
                d: "Binary search for each element O(n log n)".to_string(),
            },
            correct: OptionKey::B,
        })
    }

    fn count_star_short() -> Question {
        build(QuestionPayload::ShortAnswer {
            answer: "count star".to_string(),
            keyword: "null".to_string(),
        })
    }

    #[test]
    fn mcq_correct_key_passes_others_fail() {
        let q = two_sum_mcq();
        assert!(grade(&q, "B"));
        assert!(!grade(&q, "A"));
        assert!(!grade(&q, "C"));
        assert!(!grade(&q, "D"));
    }

    #[test]
    fn mcq_key_match_is_case_sensitive() {
        let q = two_sum_mcq();
        assert!(!grade(&q, "b"));
    }

    #[test]
    fn mcq_submission_is_trimmed() {
        let q = two_sum_mcq();
        assert!(grade(&q, "  B \n"));
    }

    #[test]
    fn short_exact_answer_ignores_case() {
        let q = count_star_short();
        assert!(grade(&q, "Count Star"));
        assert!(grade(&q, "COUNT STAR"));
    }

    #[test]
    fn short_keyword_substring_passes() {
        let q = count_star_short();
        // Differs from the canonical answer but contains the keyword.
        assert!(grade(&q, "NULL values are skipped"));
    }

    #[test]
    fn short_keyword_alone_passes() {
        let q = count_star_short();
        assert!(grade(&q, "null"));
    }

    #[test]
    fn short_unrelated_text_fails() {
        let q = count_star_short();
        assert!(!grade(&q, "counts every row"));
    }
}
