use std::sync::Arc;

use storage::repository::Storage;
use storage::seed::seed_questions_if_empty;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::practice_service::PracticeService;
use crate::question_service::QuestionService;

/// Assembles the app-facing services over a shared storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    questions: Arc<QuestionService>,
    practice: Arc<PracticeService>,
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, running migrations and the
    /// one-time sample seed as an explicit startup step.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or seeding fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;

        let seeded = seed_questions_if_empty(storage.questions.as_ref()).await?;
        if seeded > 0 {
            tracing::info!(count = seeded, "seeded sample questions");
        }

        Ok(Self::with_storage(&storage, clock))
    }

    /// Wire services over an already-initialized storage backend.
    #[must_use]
    pub fn with_storage(storage: &Storage, clock: Clock) -> Self {
        let auth = Arc::new(AuthService::new(clock, Arc::clone(&storage.users)));
        let questions = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
        let practice = Arc::new(PracticeService::new(
            clock,
            Arc::clone(&storage.questions),
            Arc::clone(&storage.attempts),
        ));
        let dashboard = Arc::new(DashboardService::new(Arc::clone(&storage.attempts)));

        Self {
            auth,
            questions,
            practice,
            dashboard,
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }
}
