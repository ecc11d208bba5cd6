use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{
    Attempt, AttemptId, Level, McqChoices, OptionKey, Page, Question, QuestionFilter, QuestionId,
    QuestionKind, QuestionPayload, User, UserId, ValidatedQuestion,
};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a user row. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a question, with the type-specific payload flattened into
/// the optional columns the store persists.
///
/// This mirrors the domain `Question` so repositories can serialize without
/// leaking storage concerns into the domain layer.
#[derive(Debug, Clone)]
pub struct NewQuestionRecord {
    pub title: String,
    pub body: String,
    pub kind: QuestionKind,
    pub level: Level,
    pub role: String,
    pub topic: String,
    pub company: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: Option<OptionKey>,
    pub answer: Option<String>,
    pub keyword: Option<String>,
    pub explanation: String,
}

impl NewQuestionRecord {
    #[must_use]
    pub fn from_validated(question: &ValidatedQuestion) -> Self {
        let (option_a, option_b, option_c, option_d, correct_option, answer, keyword) =
            match &question.payload {
                QuestionPayload::MultipleChoice { choices, correct } => (
                    Some(choices.a.clone()),
                    Some(choices.b.clone()),
                    Some(choices.c.clone()),
                    Some(choices.d.clone()),
                    Some(*correct),
                    None,
                    None,
                ),
                QuestionPayload::ShortAnswer { answer, keyword } => (
                    None,
                    None,
                    None,
                    None,
                    None,
                    Some(answer.clone()),
                    Some(keyword.clone()),
                ),
            };

        Self {
            title: question.title.clone(),
            body: question.body.clone(),
            kind: question.payload.kind(),
            level: question.level,
            role: question.role.clone(),
            topic: question.topic.clone(),
            company: question.company.clone(),
            option_a,
            option_b,
            option_c,
            option_d,
            correct_option,
            answer,
            keyword,
            explanation: question.explanation.clone(),
        }
    }

    /// Reassembles the type-specific payload from the flattened columns.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when a column required by the
    /// question kind is missing.
    pub fn payload(&self) -> Result<QuestionPayload, StorageError> {
        fn required(field: &'static str, v: &Option<String>) -> Result<String, StorageError> {
            v.clone()
                .ok_or_else(|| StorageError::Serialization(format!("missing {field}")))
        }

        match self.kind {
            QuestionKind::Mcq => Ok(QuestionPayload::MultipleChoice {
                choices: McqChoices {
                    a: required("option_a", &self.option_a)?,
                    b: required("option_b", &self.option_b)?,
                    c: required("option_c", &self.option_c)?,
                    d: required("option_d", &self.option_d)?,
                },
                correct: self
                    .correct_option
                    .ok_or_else(|| StorageError::Serialization("missing correct_option".into()))?,
            }),
            QuestionKind::Short => Ok(QuestionPayload::ShortAnswer {
                answer: required("answer", &self.answer)?,
                keyword: required("keyword", &self.keyword)?,
            }),
        }
    }

    /// Convert the record into a domain `Question` under the given id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when the payload columns are
    /// inconsistent with the question kind.
    pub fn into_question(self, id: QuestionId) -> Result<Question, StorageError> {
        let payload = self.payload()?;
        Ok(Question {
            id,
            title: self.title,
            body: self.body,
            level: self.level,
            role: self.role,
            topic: self.topic,
            company: self.company,
            payload,
            explanation: self.explanation,
        })
    }
}

/// Insert shape for one attempt ledger entry. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAttemptRecord {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub is_correct: bool,
    pub submitted: String,
    pub created_at: DateTime<Utc>,
}

/// Distinct categorical values present in the question store, used to build
/// filter dropdowns. Levels are a fixed list and not included here.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FilterFacets {
    pub roles: Vec<String>,
    pub topics: Vec<String>,
    pub companies: Vec<String>,
}

/// Repository contract for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered,
    /// or other storage errors.
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, StorageError>;

    /// Look up a user by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Fetch a user by id. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError>;
}

/// Repository contract for questions, including filtered browsing.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a new question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn insert_question(&self, question: NewQuestionRecord)
    -> Result<QuestionId, StorageError>;

    /// Fetch a question by id. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// One page of questions matching the filter, newest first.
    ///
    /// Pages are 1-based; a page past the end yields an empty page with
    /// intact metadata.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn search_questions(
        &self,
        filter: &QuestionFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Question>, StorageError>;

    /// Total number of stored questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn count_questions(&self) -> Result<u64, StorageError>;

    /// Distinct roles, topics, and companies present in the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn distinct_facets(&self) -> Result<FilterFacets, StorageError>;
}

/// Repository contract for the append-only attempt ledger.
///
/// There is deliberately no update or delete operation.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Append one attempt to the ledger.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn append_attempt(&self, attempt: &NewAttemptRecord)
    -> Result<AttemptId, StorageError>;

    /// Total attempts recorded for the user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn count_attempts(&self, user_id: UserId) -> Result<u64, StorageError>;

    /// Attempts recorded as correct for the user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn count_correct_attempts(&self, user_id: UserId) -> Result<u64, StorageError>;

    /// The user's most recent attempts, by descending timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn recent_attempts(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<Attempt>, StorageError>;
}

#[derive(Default)]
struct MemState {
    users: Vec<User>,
    questions: Vec<Question>,
    attempts: Vec<Attempt>,
    next_user_id: u64,
    next_question_id: u64,
    next_attempt_id: u64,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, StorageError> {
        let mut state = self.lock()?;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(StorageError::Conflict);
        }
        state.next_user_id += 1;
        let id = UserId::new(state.next_user_id);
        state.users.push(User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        });
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let state = self.lock()?;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let state = self.lock()?;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn insert_question(
        &self,
        question: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        let mut state = self.lock()?;
        state.next_question_id += 1;
        let id = QuestionId::new(state.next_question_id);
        let question = question.into_question(id)?;
        state.questions.push(question);
        Ok(id)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let state = self.lock()?;
        Ok(state.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn search_questions(
        &self,
        filter: &QuestionFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Question>, StorageError> {
        let state = self.lock()?;
        let mut matching: Vec<Question> = state
            .questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));

        let total = matching.len() as u64;
        let page = page.max(1);
        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let items: Vec<Question> = matching
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Ok(Page::new(items, page, per_page, total))
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let state = self.lock()?;
        Ok(state.questions.len() as u64)
    }

    async fn distinct_facets(&self) -> Result<FilterFacets, StorageError> {
        let state = self.lock()?;
        let roles: BTreeSet<String> = state.questions.iter().map(|q| q.role.clone()).collect();
        let topics: BTreeSet<String> = state.questions.iter().map(|q| q.topic.clone()).collect();
        let companies: BTreeSet<String> =
            state.questions.iter().map(|q| q.company.clone()).collect();
        Ok(FilterFacets {
            roles: roles.into_iter().collect(),
            topics: topics.into_iter().collect(),
            companies: companies.into_iter().collect(),
        })
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn append_attempt(
        &self,
        attempt: &NewAttemptRecord,
    ) -> Result<AttemptId, StorageError> {
        let mut state = self.lock()?;
        state.next_attempt_id += 1;
        let id = AttemptId::new(state.next_attempt_id);
        state.attempts.push(Attempt {
            id,
            user_id: attempt.user_id,
            question_id: attempt.question_id,
            is_correct: attempt.is_correct,
            submitted: attempt.submitted.clone(),
            created_at: attempt.created_at,
        });
        Ok(id)
    }

    async fn count_attempts(&self, user_id: UserId) -> Result<u64, StorageError> {
        let state = self.lock()?;
        Ok(state.attempts.iter().filter(|a| a.user_id == user_id).count() as u64)
    }

    async fn count_correct_attempts(&self, user_id: UserId) -> Result<u64, StorageError> {
        let state = self.lock()?;
        Ok(state
            .attempts
            .iter()
            .filter(|a| a.user_id == user_id && a.is_correct)
            .count() as u64)
    }

    async fn recent_attempts(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<Attempt>, StorageError> {
        let state = self.lock()?;
        let mut mine: Vec<Attempt> = state
            .attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        mine.truncate(limit as usize);
        Ok(mine)
    }
}

/// Aggregates the three repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let users: Arc<dyn UserRepository> = Arc::new(repo.clone());
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo);
        Self {
            users,
            questions,
            attempts,
        }
    }
}
