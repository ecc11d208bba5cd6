use serde::{Deserialize, Serialize};

use crate::model::question::{Level, Question};

/// Explicit filter specification for browsing questions.
///
/// Each provided criterion narrows the result set; absent criteria impose no
/// constraint. Categorical criteria match exactly. The free-text `term`
/// matches case-insensitively against either title or body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFilter {
    pub role: Option<String>,
    pub topic: Option<String>,
    pub level: Option<Level>,
    pub company: Option<String>,
    pub term: Option<String>,
}

impl QuestionFilter {
    /// Returns true when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.topic.is_none()
            && self.level.is_none()
            && self.company.is_none()
            && self.term.is_none()
    }

    /// Evaluates the filter against a single question.
    ///
    /// This is the canonical definition of the filter semantics: the term is
    /// a literal substring, never a pattern, and the SQL backend escapes LIKE
    /// wildcards to keep that verdict. Case folding is only guaranteed to
    /// agree across backends for ASCII terms.
    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(role) = &self.role {
            if question.role != *role {
                return false;
            }
        }
        if let Some(topic) = &self.topic {
            if question.topic != *topic {
                return false;
            }
        }
        if let Some(level) = self.level {
            if question.level != level {
                return false;
            }
        }
        if let Some(company) = &self.company {
            if question.company != *company {
                return false;
            }
        }
        if let Some(term) = &self.term {
            let needle = term.to_lowercase();
            let in_title = question.title.to_lowercase().contains(&needle);
            let in_body = question.body.to_lowercase().contains(&needle);
            if !in_title && !in_body {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuestionId;
    use crate::model::question::{QuestionDraft, QuestionPayload};

    fn question(title: &str, body: &str, role: &str, topic: &str, level: Level) -> Question {
        QuestionDraft {
            title: title.to_string(),
            body: body.to_string(),
            level,
            role: role.to_string(),
            topic: topic.to_string(),
            company: "General".to_string(),
            payload: QuestionPayload::ShortAnswer {
                answer: "count star".to_string(),
                keyword: "null".to_string(),
            },
            explanation: String::new(),
        }
        .validate()
        .unwrap()
        .assign_id(QuestionId::new(1))
    }

    #[test]
    fn empty_filter_matches_everything() {
        let q = question("SQL: COUNT vs COUNT(*)", "Explain.", "Data Analyst", "SQL", Level::Beginner);
        assert!(QuestionFilter::default().matches(&q));
    }

    #[test]
    fn role_must_match_exactly() {
        let q = question("T", "B", "Data Analyst", "SQL", Level::Beginner);
        let filter = QuestionFilter {
            role: Some("data analyst".to_string()),
            ..QuestionFilter::default()
        };
        assert!(!filter.matches(&q));
    }

    #[test]
    fn term_matches_title_case_insensitively() {
        let q = question("SQL: COUNT vs COUNT(*)", "Explain.", "Data Analyst", "SQL", Level::Beginner);
        let filter = QuestionFilter {
            term: Some("sql".to_string()),
            ..QuestionFilter::default()
        };
        assert!(filter.matches(&q));
    }

    #[test]
    fn term_falls_back_to_body() {
        let q = question("Counting rows", "COUNT(col) skips NULL.", "Data Analyst", "SQL", Level::Beginner);
        let filter = QuestionFilter {
            term: Some("null".to_string()),
            ..QuestionFilter::default()
        };
        assert!(filter.matches(&q));
    }

    #[test]
    fn all_criteria_are_anded() {
        let q = question("T", "B", "SDE", "Arrays", Level::Beginner);
        let filter = QuestionFilter {
            role: Some("SDE".to_string()),
            level: Some(Level::Expert),
            ..QuestionFilter::default()
        };
        assert!(!filter.matches(&q));
    }
}
