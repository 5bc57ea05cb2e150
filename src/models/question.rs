//! Question records and their load-time validation.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Minimum number of choices a question must offer.
pub const MIN_CHOICES: usize = 2;

/// Identifier shown next to a question in the breakdown.
///
/// Only a display aid: two questions may carry the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl QuestionId {
    /// Convert a JSON scalar id. Integers that fit `i64` stay numeric;
    /// floats, larger integers and booleans keep their JSON rendering.
    pub fn from_scalar(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => QuestionId::Number(i),
                None => QuestionId::Text(n.to_string()),
            }),
            Value::String(s) => Some(QuestionId::Text(s)),
            Value::Bool(b) => Some(QuestionId::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        QuestionId::Number(value)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        QuestionId::Text(value.to_string())
    }
}

/// Reasons a question record is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question text is empty")]
    MissingText,
    #[error("question id must be a scalar")]
    NonScalarId,
    #[error("question needs at least 2 choices, got {0}")]
    TooFewChoices(usize),
    #[error("correct index {index} is out of range for {choices} choices")]
    CorrectIndexOutOfRange { index: i64, choices: usize },
}

/// A question as it appears in a JSON question source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default)]
    pub id: Option<Value>,
    pub text: String,
    pub choices: Vec<String>,
    pub correct_index: i64,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl RawQuestion {
    /// Validate the record, using `position` as the id when none was given.
    pub fn validate(self, position: usize) -> Result<Question, QuestionError> {
        let id = match self.id {
            None | Some(Value::Null) => QuestionId::Number(position as i64),
            Some(value) => QuestionId::from_scalar(value).ok_or(QuestionError::NonScalarId)?,
        };
        let correct_index = usize::try_from(self.correct_index).map_err(|_| {
            QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                choices: self.choices.len(),
            }
        })?;

        Question::new(id, self.text, self.choices, correct_index, self.explanation)
    }
}

/// A validated multiple-choice question.
///
/// Construction checks every invariant, so a `Question` that exists is
/// always safe to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    choices: Vec<String>,
    correct_index: usize,
    explanation: Option<String>,
}

impl Question {
    pub fn new(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        choices: Vec<String>,
        correct_index: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::MissingText);
        }

        if choices.len() < MIN_CHOICES {
            return Err(QuestionError::TooFewChoices(choices.len()));
        }

        if correct_index >= choices.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index as i64,
                choices: choices.len(),
            });
        }

        Ok(Self {
            id: id.into(),
            text,
            choices,
            correct_index,
            explanation: explanation.filter(|e| !e.trim().is_empty()),
        })
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct choice.
    pub fn correct_answer(&self) -> &str {
        &self.choices[self.correct_index]
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}
