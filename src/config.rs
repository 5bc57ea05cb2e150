//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::{DEFAULT_QUESTIONS_PATH, QuestionSource};

/// File name of the log written when `--log-file` is not given.
pub const DEFAULT_LOG_FILE: &str = "quiz-runner.log";

#[derive(Parser, Debug)]
#[command(version, about = "Multiple-choice quiz runner for the terminal", long_about = None)]
pub struct Args {
    /// JSON file or http(s) URL to load the questions from
    #[arg(short, long, default_value = DEFAULT_QUESTIONS_PATH)]
    pub questions: String,

    /// Seconds to wait for the question source before using the built-in set
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,

    /// Seed for a reproducible question order
    #[arg(long)]
    pub seed: Option<u64>,

    /// File receiving diagnostics (defaults to the system temp directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Load the questions and start right away instead of showing the start screen
    #[arg(long)]
    pub load: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("question source must not be empty")]
    EmptySource,
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: QuestionSource,
    pub timeout: Duration,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub load_on_start: bool,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let questions = args.questions.trim();
        if questions.is_empty() {
            return Err(ConfigError::EmptySource);
        }
        if args.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            source: QuestionSource::parse(questions),
            timeout: Duration::from_secs(args.timeout_secs),
            seed: args.seed,
            log_file: args
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE)),
            load_on_start: args.load,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: QuestionSource::default(),
            timeout: crate::data::DEFAULT_TIMEOUT,
            seed: None,
            log_file: std::env::temp_dir().join(DEFAULT_LOG_FILE),
            load_on_start: false,
        }
    }
}
