//! Presenter state: screen routing, highlighted choice and feedback on
//! top of a [`Session`].

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::data::{LoadOutcome, fallback_questions};
use crate::models::Question;
use crate::session::{AnswerOutcome, Progress, QuizResults, Session, SessionError, SessionState};

/// Which screen the presenter shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Quiz,
    Result,
}

/// How a choice is drawn on the quiz screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
    Plain,
    Highlighted,
    Correct,
    Wrong,
}

pub struct App {
    pub screen: Screen,
    session: Session,
    rng: Option<StdRng>,
    highlighted: usize,
    last_outcome: Option<AnswerOutcome>,
    notice: Option<String>,
    loading: bool,
    result_scroll: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Start,
            session: Session::new(),
            rng: None,
            highlighted: 0,
            last_outcome: None,
            notice: None,
            loading: false,
            result_scroll: 0,
        }
    }

    /// Shuffle with a seeded generator so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Start a quiz over `questions`.
    ///
    /// `uses_fallback` marks a run on the built-in set, which the start
    /// screen reports.
    pub fn begin(
        &mut self,
        questions: &[Arc<Question>],
        uses_fallback: bool,
    ) -> Result<(), SessionError> {
        match self.rng.as_mut() {
            Some(rng) => self.session.start_with_rng(questions, rng)?,
            None => self.session.start(questions)?,
        };

        info!(
            session = %self.session.id(),
            total = self.session.total(),
            uses_fallback,
            "quiz started"
        );
        self.loading = false;
        self.reset_question_view();
        self.result_scroll = 0;
        self.screen = Screen::Quiz;
        Ok(())
    }

    /// Start on the built-in question set.
    pub fn begin_builtin(&mut self) -> Result<(), SessionError> {
        self.notice = None;
        self.begin(&fallback_questions(), true)
    }

    /// Start on the result of a load, noting when the fallback set was
    /// substituted.
    pub fn begin_loaded(&mut self, outcome: LoadOutcome) -> Result<(), SessionError> {
        self.notice = outcome
            .fallback_reason()
            .map(|reason| format!("Loading failed ({}), using built-in questions.", reason));
        let uses_fallback = outcome.uses_fallback();
        self.begin(&outcome.into_questions(), uses_fallback)
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Answer the active question with `index`.
    pub fn select_choice(&mut self, index: usize) -> Result<&AnswerOutcome, SessionError> {
        let outcome = self.session.answer(index)?;
        self.highlighted = index;
        Ok(self.last_outcome.insert(outcome))
    }

    /// Answer with the highlighted choice.
    pub fn submit_highlighted(&mut self) -> Result<&AnswerOutcome, SessionError> {
        self.select_choice(self.highlighted)
    }

    pub fn advance(&mut self) -> Result<(), SessionError> {
        let state = self.session.advance()?;
        self.after_move(state);
        Ok(())
    }

    pub fn skip(&mut self) -> Result<(), SessionError> {
        let state = self.session.skip()?;
        self.after_move(state);
        Ok(())
    }

    /// Replay the current set in the same order.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        self.session.retry()?;
        self.reset_question_view();
        self.result_scroll = 0;
        self.screen = Screen::Quiz;
        Ok(())
    }

    pub fn return_to_start(&mut self) {
        self.session.restart_to_start();
        self.reset_question_view();
        self.notice = None;
        self.loading = false;
        self.result_scroll = 0;
        self.screen = Screen::Start;
    }

    fn after_move(&mut self, state: SessionState) {
        self.reset_question_view();
        if state == SessionState::Completed {
            self.screen = Screen::Result;
        }
    }

    fn reset_question_view(&mut self) {
        self.highlighted = 0;
        self.last_outcome = None;
    }

    pub fn highlight_next(&mut self) {
        if let Some(count) = self.selectable_choices() {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn highlight_previous(&mut self) {
        if let Some(count) = self.selectable_choices() {
            self.highlighted = (self.highlighted + count - 1) % count;
        }
    }

    /// Number of choices while the active question can still be answered.
    fn selectable_choices(&self) -> Option<usize> {
        if self.session.is_current_answered() {
            return None;
        }
        self.current_question().map(|q| q.choices().len())
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.log().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    pub fn progress(&self) -> Progress {
        self.session.progress()
    }

    pub fn score(&self) -> usize {
        self.session.score()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn is_answered(&self) -> bool {
        self.session.is_current_answered()
    }

    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn feedback(&self) -> Option<String> {
        self.last_outcome.as_ref().map(AnswerOutcome::feedback)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn results(&self) -> Option<QuizResults> {
        self.session.results().ok()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn choice_mark(&self, index: usize) -> ChoiceMark {
        match &self.last_outcome {
            Some(outcome) if index == outcome.correct_index => ChoiceMark::Correct,
            Some(outcome) if index == outcome.chosen => ChoiceMark::Wrong,
            Some(_) => ChoiceMark::Plain,
            None if index == self.highlighted => ChoiceMark::Highlighted,
            None => ChoiceMark::Plain,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
