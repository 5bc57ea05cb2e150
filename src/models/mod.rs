mod question;
mod record;

pub use question::{Question, QuestionError, QuestionId, RawQuestion};
pub use record::{AnswerRecord, RecordOutcome};
