use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::RawQuestion;

use super::QuestionSet;
use super::fallback::fallback_questions;

/// Default location of the question file.
pub const DEFAULT_QUESTIONS_PATH: &str = "questions.json";

/// Default bound on a single acquisition attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where questions are acquired from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// A JSON document served over HTTP(S).
    Url(String),
}

impl QuestionSource {
    /// Interpret a command-line value as a URL or a file path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            QuestionSource::Url(value.to_string())
        } else {
            QuestionSource::File(PathBuf::from(value))
        }
    }
}

impl Default for QuestionSource {
    fn default() -> Self {
        QuestionSource::File(PathBuf::from(DEFAULT_QUESTIONS_PATH))
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionSource::File(path) => write!(f, "{}", path.display()),
            QuestionSource::Url(url) => f.write_str(url),
        }
    }
}

/// Why a question source could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered with HTTP {0}")]
    Status(u16),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top-level value is not an array")]
    NotAnArray,
    #[error("question list is empty")]
    Empty,
    #[error("question #{position} is invalid: {reason}")]
    InvalidQuestion { position: usize, reason: String },
}

/// Result of an acquisition attempt.
///
/// Acquisition never fails outright: a failure carries the fallback set
/// together with the reason it was substituted.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(QuestionSet),
    Fallback {
        questions: QuestionSet,
        reason: LoadError,
    },
}

impl LoadOutcome {
    pub fn questions(&self) -> &QuestionSet {
        match self {
            LoadOutcome::Loaded(questions) | LoadOutcome::Fallback { questions, .. } => questions,
        }
    }

    pub fn into_questions(self) -> QuestionSet {
        match self {
            LoadOutcome::Loaded(questions) | LoadOutcome::Fallback { questions, .. } => questions,
        }
    }

    pub fn uses_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&LoadError> {
        match self {
            LoadOutcome::Fallback { reason, .. } => Some(reason),
            LoadOutcome::Loaded(_) => None,
        }
    }
}

/// Acquires and validates question sets.
#[derive(Debug, Clone)]
pub struct QuestionRepository {
    source: QuestionSource,
    timeout: Duration,
    client: reqwest::Client,
}

impl QuestionRepository {
    pub fn new(source: QuestionSource, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn source(&self) -> &QuestionSource {
        &self.source
    }

    /// Load questions from the configured source, substituting the
    /// fallback set on any failure.
    pub async fn load(&self) -> LoadOutcome {
        match self.try_load().await {
            Ok(questions) => {
                info!(source = %self.source, count = questions.len(), "loaded questions");
                LoadOutcome::Loaded(questions)
            }
            Err(reason) => {
                warn!(source = %self.source, %reason, "loading failed, using fallback questions");
                LoadOutcome::Fallback {
                    questions: fallback_questions(),
                    reason,
                }
            }
        }
    }

    async fn try_load(&self) -> Result<QuestionSet, LoadError> {
        let body = tokio::time::timeout(self.timeout, self.fetch())
            .await
            .map_err(|_| LoadError::Timeout(self.timeout))??;
        parse_questions(&body)
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        match &self.source {
            QuestionSource::File(path) => {
                debug!(path = %path.display(), "reading question file");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })
            }
            QuestionSource::Url(url) => {
                debug!(%url, "fetching questions");
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status(status.as_u16()));
                }
                Ok(response.text().await?)
            }
        }
    }
}

/// Parse and validate a JSON question document.
pub fn parse_questions(json: &str) -> Result<QuestionSet, LoadError> {
    let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
        return Err(LoadError::NotAnArray);
    };

    if items.is_empty() {
        return Err(LoadError::Empty);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            let invalid = |reason: String| LoadError::InvalidQuestion { position, reason };
            let raw: RawQuestion =
                serde_json::from_value(item).map_err(|e| invalid(e.to_string()))?;
            raw.validate(position)
                .map(Arc::new)
                .map_err(|e| invalid(e.to_string()))
        })
        .collect()
}
