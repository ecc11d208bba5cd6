use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── CATEGORICAL ATTRIBUTES ────────────────────────────────────────────────────
//

/// Difficulty level of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    /// All levels, in display order.
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Expert];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Expert => "Expert",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a `Level` from string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level: {raw}")]
pub struct ParseLevelError {
    raw: String,
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Level::Beginner),
            "Intermediate" => Ok(Level::Intermediate),
            "Expert" => Ok(Level::Expert),
            other => Err(ParseLevelError {
                raw: other.to_string(),
            }),
        }
    }
}

/// One of the four multiple-choice option slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing an `OptionKey` from string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown option key: {raw}")]
pub struct ParseOptionKeyError {
    raw: String,
}

impl FromStr for OptionKey {
    type Err = ParseOptionKeyError;

    // Uppercase only. Option keys are stored and compared case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionKey::A),
            "B" => Ok(OptionKey::B),
            "C" => Ok(OptionKey::C),
            "D" => Ok(OptionKey::D),
            other => Err(ParseOptionKeyError {
                raw: other.to_string(),
            }),
        }
    }
}

//
// ─── QUESTION PAYLOAD ──────────────────────────────────────────────────────────
//

/// The four option texts of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqChoices {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
}

impl McqChoices {
    /// Returns the option text stored under the given key.
    #[must_use]
    pub fn text(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }
}

/// Question kind discriminant, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    Mcq,
    Short,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Mcq => "mcq",
            QuestionKind::Short => "short",
        }
    }
}

/// Type-specific payload of a question.
///
/// The kind determines which fields are meaningful: a multiple-choice question
/// carries four option texts and the correct key, a short-answer question
/// carries the canonical answer text and the keyword used for lenient grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionPayload {
    MultipleChoice {
        choices: McqChoices,
        correct: OptionKey,
    },
    ShortAnswer {
        answer: String,
        keyword: String,
    },
}

impl QuestionPayload {
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionPayload::MultipleChoice { .. } => QuestionKind::Mcq,
            QuestionPayload::ShortAnswer { .. } => QuestionKind::Short,
        }
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub title: String,
    pub body: String,
    pub level: Level,
    pub role: String,
    pub topic: String,
    pub company: String,
    pub payload: QuestionPayload,
    pub explanation: String,
}

impl QuestionDraft {
    /// Validates the draft, checking that title, body, and the payload fields
    /// required by the question kind are non-empty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError` naming the first offending field.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionValidationError> {
        if self.title.trim().is_empty() {
            return Err(QuestionValidationError::EmptyTitle);
        }
        if self.body.trim().is_empty() {
            return Err(QuestionValidationError::EmptyBody);
        }
        match &self.payload {
            QuestionPayload::MultipleChoice { choices, .. } => {
                for key in OptionKey::ALL {
                    if choices.text(key).trim().is_empty() {
                        return Err(QuestionValidationError::EmptyOption(key));
                    }
                }
            }
            QuestionPayload::ShortAnswer { answer, keyword } => {
                if answer.trim().is_empty() {
                    return Err(QuestionValidationError::EmptyAnswer);
                }
                if keyword.trim().is_empty() {
                    return Err(QuestionValidationError::EmptyKeyword);
                }
            }
        }

        Ok(ValidatedQuestion {
            title: self.title,
            body: self.body,
            level: self.level,
            role: self.role,
            topic: self.topic,
            company: self.company,
            payload: self.payload,
            explanation: self.explanation,
        })
    }
}

/// A draft that passed validation but has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub title: String,
    pub body: String,
    pub level: Level,
    pub role: String,
    pub topic: String,
    pub company: String,
    pub payload: QuestionPayload,
    pub explanation: String,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            title: self.title,
            body: self.body,
            level: self.level,
            role: self.role,
            topic: self.topic,
            company: self.company,
            payload: self.payload,
            explanation: self.explanation,
        }
    }
}

/// A persisted interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub body: String,
    pub level: Level,
    pub role: String,
    pub topic: String,
    pub company: String,
    pub payload: QuestionPayload,
    pub explanation: String,
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    #[error("question title is empty")]
    EmptyTitle,

    #[error("question body is empty")]
    EmptyBody,

    #[error("option {0} text is empty")]
    EmptyOption(OptionKey),

    #[error("short answer text is empty")]
    EmptyAnswer,

    #[error("short answer keyword is empty")]
    EmptyKeyword,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq_draft() -> QuestionDraft {
        QuestionDraft {
            title: "Two Sum (Array)".to_string(),
            body: "Given an array and target, return indices of two numbers adding to target."
                .to_string(),
            level: Level::Beginner,
            role: "SDE".to_string(),
            topic: "Arrays".to_string(),
            company: "General".to_string(),
            payload: QuestionPayload::MultipleChoice {
                choices: McqChoices {
                    a: "Use two loops O(n^2)".to_string(),
                    b: "Use hash map to store complements O(n)".to_string(),
                    c: "Sort then two pointers O(n log n)".to_string(),
                    d: "Binary search for each element O(n log n)".to_string(),
                },
                correct: OptionKey::B,
            },
            explanation: "Use a dict value->index.".to_string(),
        }
    }

    #[test]
    fn draft_fails_if_title_empty() {
        let mut draft = mcq_draft();
        draft.title = "   ".to_string();
        let err = draft.validate().unwrap_err();
        assert_eq!(err, QuestionValidationError::EmptyTitle);
    }

    #[test]
    fn draft_fails_if_option_empty() {
        let mut draft = mcq_draft();
        let QuestionPayload::MultipleChoice { choices, .. } = &mut draft.payload else {
            unreachable!()
        };
        choices.c = String::new();
        let err = draft.validate().unwrap_err();
        assert_eq!(err, QuestionValidationError::EmptyOption(OptionKey::C));
    }

    #[test]
    fn short_draft_requires_keyword() {
        let mut draft = mcq_draft();
        draft.payload = QuestionPayload::ShortAnswer {
            answer: "count star".to_string(),
            keyword: " ".to_string(),
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err, QuestionValidationError::EmptyKeyword);
    }

    #[test]
    fn valid_draft_validates_and_assigns_id() {
        let question = mcq_draft().validate().unwrap().assign_id(QuestionId::new(42));
        assert_eq!(question.id, QuestionId::new(42));
        assert_eq!(question.payload.kind(), QuestionKind::Mcq);
        assert_eq!(question.title, "Two Sum (Array)");
    }

    #[test]
    fn level_parses_exact_names_only() {
        assert_eq!("Expert".parse::<Level>().unwrap(), Level::Expert);
        assert!("expert".parse::<Level>().is_err());
    }

    #[test]
    fn option_key_parse_is_case_sensitive() {
        assert_eq!("B".parse::<OptionKey>().unwrap(), OptionKey::B);
        assert!("b".parse::<OptionKey>().is_err());
    }
}
