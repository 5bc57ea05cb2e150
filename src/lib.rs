//! # quiz-runner
//!
//! A terminal multiple-choice quiz with instant feedback.
//!
//! The [`Session`] state machine is independent of the terminal front end
//! and can drive any presenter.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_runner::{Config, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = Config::default();
//!     Quiz::new(&config).run().await
//! }
//! ```
//!
//! Driving a session directly:
//!
//! ```rust
//! use quiz_runner::{Session, SessionState, parse_questions};
//!
//! let questions = parse_questions(
//!     r#"[{"text": "1+1?", "choices": ["1", "2", "3"], "correctIndex": 1}]"#,
//! )
//! .unwrap();
//!
//! let mut session = Session::new();
//! session.start(&questions).unwrap();
//! assert!(session.answer(1).unwrap().correct);
//! assert_eq!(session.advance().unwrap(), SessionState::Completed);
//! assert_eq!(session.results().unwrap().percentage, 100);
//! ```

mod app;
pub mod config;
mod data;
mod error;
pub mod logging;
mod models;
mod session;
pub mod shuffle;
pub mod terminal;
mod ui;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::debug;

pub use app::{App, ChoiceMark, Screen};
pub use config::{Args, Config, ConfigError};
pub use data::{
    LoadError, LoadOutcome, QuestionRepository, QuestionSet, QuestionSource, fallback_questions,
    parse_questions,
};
pub use error::QuizError;
pub use models::{AnswerRecord, Question, QuestionError, QuestionId, RecordOutcome};
pub use session::{
    AnswerOutcome, Progress, QuizResults, Session, SessionError, SessionState, percentage,
};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A quiz ready to run in the terminal.
pub struct Quiz {
    app: App,
    repository: QuestionRepository,
    load_on_start: bool,
}

impl Quiz {
    pub fn new(config: &Config) -> Self {
        let app = match config.seed {
            Some(seed) => App::new().with_seed(seed),
            None => App::new(),
        };

        Self {
            app,
            repository: QuestionRepository::new(config.source.clone(), config.timeout),
            load_on_start: config.load_on_start,
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::init()?;

        if self.load_on_start {
            load_and_begin(guard.terminal(), &mut self.app, &self.repository).await?;
        }
        run_event_loop(guard.terminal(), &mut self.app, &self.repository).await
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// What the event loop does after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Continue,
    Load,
    Quit,
}

async fn run_event_loop(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App,
    repository: &QuestionRepository,
) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_input(app, key.code) {
                Action::Continue => {}
                Action::Load => load_and_begin(terminal, app, repository).await?,
                Action::Quit => break,
            }
        }
    }

    Ok(())
}

async fn load_and_begin(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App,
    repository: &QuestionRepository,
) -> Result<(), QuizError> {
    app.set_loading();
    terminal.draw(|frame| ui::render(frame, app))?;

    let outcome = repository.load().await;
    report(app.begin_loaded(outcome));
    Ok(())
}

/// Log a command the session refused; keys pressed in the wrong phase
/// end up here.
fn report<T>(result: Result<T, SessionError>) {
    if let Err(err) = result {
        debug!(%err, "command rejected");
    }
}

fn handle_input(app: &mut App, key: KeyCode) -> Action {
    if app.is_loading() {
        return Action::Continue;
    }

    match app.screen {
        Screen::Start => handle_start_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Result => handle_result_input(app, key),
    }
}

fn handle_start_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
            report(app.begin_builtin());
            Action::Continue
        }
        KeyCode::Char('l') | KeyCode::Char('L') => Action::Load,
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        _ => Action::Continue,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.highlight_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.highlight_next(),
        KeyCode::Enter | KeyCode::Char(' ') => report(app.submit_highlighted()),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            report(app.select_choice(index));
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Right => report(app.advance()),
        KeyCode::Char('s') | KeyCode::Char('S') => report(app.skip()),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => report(app.retry()),
        KeyCode::Char('b') | KeyCode::Char('B') => app.return_to_start(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ => {}
    }
    Action::Continue
}
