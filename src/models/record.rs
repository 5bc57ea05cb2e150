//! Answer log entries.

use super::{Question, QuestionId};

/// Outcome of one traversed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The user picked a choice.
    Answered {
        chosen: usize,
        correct: bool,
        correct_answer: String,
        explanation: Option<String>,
    },
    /// The user moved on without answering.
    Skipped,
}

/// One entry of the session's answer log.
///
/// Question id and text are copied at answer time so the log stays
/// readable after the question set is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub question_text: String,
    pub outcome: RecordOutcome,
}

impl AnswerRecord {
    pub fn answered(question: &Question, chosen: usize) -> Self {
        Self {
            question_id: question.id().clone(),
            question_text: question.text().to_string(),
            outcome: RecordOutcome::Answered {
                chosen,
                correct: question.is_correct(chosen),
                correct_answer: question.correct_answer().to_string(),
                explanation: question.explanation().map(str::to_string),
            },
        }
    }

    pub fn skipped(question: &Question) -> Self {
        Self {
            question_id: question.id().clone(),
            question_text: question.text().to_string(),
            outcome: RecordOutcome::Skipped,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self.outcome, RecordOutcome::Answered { correct: true, .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, RecordOutcome::Skipped)
    }

    /// One-line breakdown entry, `position` being zero-based.
    pub fn summary_line(&self, position: usize) -> String {
        let number = position + 1;
        match &self.outcome {
            RecordOutcome::Skipped => format!("Q{}: Skipped — {}", number, self.question_text),
            RecordOutcome::Answered { correct: true, .. } => {
                format!("Q{}: Correct — {}", number, self.question_text)
            }
            RecordOutcome::Answered {
                correct_answer,
                explanation,
                ..
            } => {
                let mut line = format!(
                    "Q{}: Wrong — {} (Correct: {})",
                    number, self.question_text, correct_answer
                );
                if let Some(explanation) = explanation {
                    line.push(' ');
                    line.push_str(explanation);
                }
                line
            }
        }
    }
}
