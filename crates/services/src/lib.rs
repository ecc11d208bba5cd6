#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod dashboard_service;
pub mod error;
pub mod practice_service;
pub mod question_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use dashboard_service::{DashboardService, DashboardSummary, RECENT_ATTEMPTS_LIMIT};
pub use error::{AppServicesError, AuthError, DashboardError, PracticeError, QuestionServiceError};
pub use practice_service::{AnswerOutcome, PracticeService};
pub use question_service::{FilterOptions, QuestionService};
