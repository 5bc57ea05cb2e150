use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced while running the terminal front end.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Invalid command-line configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// Terminal or log file IO failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
