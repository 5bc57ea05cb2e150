mod fallback;
mod loader;

use std::sync::Arc;

use crate::models::Question;

pub use fallback::fallback_questions;
pub use loader::{
    DEFAULT_QUESTIONS_PATH, DEFAULT_TIMEOUT, LoadError, LoadOutcome, QuestionRepository,
    QuestionSource, parse_questions,
};

/// An ordered question set whose records are shared, not copied, between
/// the repository and any session using them.
pub type QuestionSet = Vec<Arc<Question>>;
