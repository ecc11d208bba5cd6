use std::sync::Arc;

use quiz_core::model::{DEFAULT_PAGE_SIZE, Level, Page, Question, QuestionFilter, QuestionId};
use serde::Serialize;
use storage::repository::QuestionRepository;

use crate::error::QuestionServiceError;

/// Values available for the browse filter controls: the distinct categorical
/// values present in the store plus the fixed level list.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub roles: Vec<String>,
    pub topics: Vec<String>,
    pub companies: Vec<String>,
    pub levels: Vec<Level>,
}

/// Filtered, paginated question browsing.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// One page of questions matching the filter, newest first, eight per
    /// page. Page numbers below 1 are clamped to 1; pages past the end come
    /// back empty with intact metadata.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn browse(
        &self,
        filter: &QuestionFilter,
        page: u32,
    ) -> Result<Page<Question>, QuestionServiceError> {
        let page = page.max(1);
        let result = self
            .questions
            .search_questions(filter, page, DEFAULT_PAGE_SIZE)
            .await?;
        Ok(result)
    }

    /// Fetch a question by id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` when missing, or
    /// `QuestionServiceError::Storage` if repository access fails.
    pub async fn get(&self, id: QuestionId) -> Result<Question, QuestionServiceError> {
        self.questions
            .get_question(id)
            .await?
            .ok_or(QuestionServiceError::NotFound)
    }

    /// Values for populating the filter dropdowns.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn filter_options(&self) -> Result<FilterOptions, QuestionServiceError> {
        let facets = self.questions.distinct_facets().await?;
        Ok(FilterOptions {
            roles: facets.roles,
            topics: facets.topics,
            companies: facets.companies,
            levels: Level::ALL.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;
    use storage::seed::seed_questions_if_empty;

    async fn seeded_service() -> QuestionService {
        let storage = Storage::in_memory();
        seed_questions_if_empty(storage.questions.as_ref())
            .await
            .unwrap();
        QuestionService::new(storage.questions)
    }

    #[tokio::test]
    async fn browse_defaults_to_first_page() {
        let service = seeded_service().await;
        let page = service.browse(&QuestionFilter::default(), 0).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_items, 6);
    }

    #[tokio::test]
    async fn level_filter_alone_scopes_practice() {
        let service = seeded_service().await;
        let filter = QuestionFilter {
            level: Some(Level::Intermediate),
            ..QuestionFilter::default()
        };
        let page = service.browse(&filter, 1).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].title, "SQL: Top N per group");
    }

    #[tokio::test]
    async fn missing_question_is_not_found() {
        let service = seeded_service().await;
        let err = service.get(QuestionId::new(999)).await.unwrap_err();
        assert!(matches!(err, QuestionServiceError::NotFound));
    }

    #[tokio::test]
    async fn filter_options_include_fixed_levels() {
        let service = seeded_service().await;
        let options = service.filter_options().await.unwrap();
        assert_eq!(options.levels, Level::ALL.to_vec());
        assert!(options.roles.contains(&"Backend".to_string()));
        assert!(options.topics.contains(&"SQL".to_string()));
        assert_eq!(options.companies, vec!["General".to_string()]);
    }
}
