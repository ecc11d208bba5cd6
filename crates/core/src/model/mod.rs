mod attempt;
mod filter;
mod ids;
mod page;
mod question;
mod user;

pub use attempt::Attempt;
pub use filter::QuestionFilter;
pub use ids::{AttemptId, ParseIdError, QuestionId, UserId};
pub use page::{DEFAULT_PAGE_SIZE, Page};
pub use question::{
    Level, McqChoices, OptionKey, ParseLevelError, ParseOptionKeyError, Question, QuestionDraft,
    QuestionKind, QuestionPayload, QuestionValidationError, ValidatedQuestion,
};
pub use user::{User, normalize_email};
