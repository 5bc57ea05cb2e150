//! Quiz session state machine.
//!
//! A [`Session`] walks through a shuffled question set one question at a
//! time. Answering records the outcome and waits for an explicit
//! [`Session::advance`]; skipping records the question and moves on at
//! once. Calls made in the wrong phase are rejected with a
//! [`SessionError`] and leave the session untouched.

use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::data::QuestionSet;
use crate::models::{AnswerRecord, Question};
use crate::shuffle::{shuffle, shuffle_with};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No run is active.
    Idle,
    /// The cursor points at a question.
    InProgress,
    /// Every question has been traversed.
    Completed,
}

/// Protocol violations reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot start a session without questions")]
    NoQuestions,
    #[error("no session in progress (state: {0:?})")]
    NotInProgress(SessionState),
    #[error("the current question has already been answered")]
    AlreadyAnswered,
    #[error("the current question has not been answered yet")]
    NotAnswered,
    #[error("choice {index} is out of range for {choices} choices")]
    ChoiceOutOfRange { index: usize, choices: usize },
    #[error("there is no question set to retry")]
    NoQuestionSet,
    #[error("results are only available once the session is completed")]
    NotCompleted,
}

/// Immediate feedback for an answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub chosen: usize,
    pub correct: bool,
    pub correct_index: usize,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

impl AnswerOutcome {
    /// Feedback line shown right after answering.
    pub fn feedback(&self) -> String {
        match (self.correct, &self.explanation) {
            (true, Some(explanation)) => format!("Correct! {}", explanation),
            (true, None) => "Correct!".to_string(),
            (false, Some(explanation)) => format!("Wrong. {}", explanation),
            (false, None) => format!("Wrong. Correct answer: {}", self.correct_answer),
        }
    }
}

/// Position of the active question, one-based and clamped to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

/// Final figures of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub breakdown: Vec<AnswerRecord>,
}

impl QuizResults {
    pub fn skipped_count(&self) -> usize {
        self.breakdown.iter().filter(|r| r.is_skipped()).count()
    }
}

/// `round(100 * score / total)` with halves rounded up.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * score + total) / (2 * total)) as u32
}

/// One quiz attempt.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    state: SessionState,
    questions: QuestionSet,
    current_index: usize,
    score: usize,
    log: Vec<AnswerRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            log: Vec::new(),
        }
    }

    /// Start a run over a shuffled copy of `questions`, discarding any
    /// run in progress.
    pub fn start(&mut self, questions: &[Arc<Question>]) -> Result<SessionState, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        self.begin_run(shuffle(questions));
        Ok(self.state)
    }

    /// Same as [`Session::start`] with a caller-supplied random source.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        questions: &[Arc<Question>],
        rng: &mut R,
    ) -> Result<SessionState, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        self.begin_run(shuffle_with(questions, rng));
        Ok(self.state)
    }

    fn begin_run(&mut self, questions: QuestionSet) {
        self.id = Uuid::new_v4();
        self.questions = questions;
        self.reset_progress();
        debug!(session = %self.id, total = self.questions.len(), "session started");
    }

    fn reset_progress(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.log.clear();
        self.state = SessionState::InProgress;
    }

    /// Answer the active question with the choice at `selected`.
    ///
    /// The cursor stays on the question until [`Session::advance`].
    pub fn answer(&mut self, selected: usize) -> Result<AnswerOutcome, SessionError> {
        let question = self.unanswered_question()?;
        let choices = question.choices().len();
        if selected >= choices {
            return Err(SessionError::ChoiceOutOfRange {
                index: selected,
                choices,
            });
        }

        let outcome = AnswerOutcome {
            chosen: selected,
            correct: question.is_correct(selected),
            correct_index: question.correct_index(),
            correct_answer: question.correct_answer().to_string(),
            explanation: question.explanation().map(str::to_string),
        };
        let record = AnswerRecord::answered(question, selected);

        if outcome.correct {
            self.score += 1;
        }
        self.log.push(record);
        debug!(
            session = %self.id,
            index = self.current_index,
            correct = outcome.correct,
            score = self.score,
            "question answered"
        );

        Ok(outcome)
    }

    /// Record the active question as skipped and move to the next one.
    pub fn skip(&mut self) -> Result<SessionState, SessionError> {
        let record = AnswerRecord::skipped(self.unanswered_question()?);
        self.log.push(record);
        debug!(session = %self.id, index = self.current_index, "question skipped");
        Ok(self.move_forward())
    }

    /// Move past an answered question.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        self.ensure_in_progress()?;
        if !self.is_current_answered() {
            return Err(SessionError::NotAnswered);
        }
        Ok(self.move_forward())
    }

    /// Replay the same question set in the same order.
    pub fn retry(&mut self) -> Result<SessionState, SessionError> {
        if self.state == SessionState::Idle || self.questions.is_empty() {
            return Err(SessionError::NoQuestionSet);
        }
        self.reset_progress();
        debug!(session = %self.id, "session retried");
        Ok(self.state)
    }

    /// Drop the question set and all progress.
    pub fn restart_to_start(&mut self) {
        self.questions.clear();
        self.current_index = 0;
        self.score = 0;
        self.log.clear();
        self.state = SessionState::Idle;
        debug!(session = %self.id, "session returned to start");
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::InProgress => Ok(()),
            other => Err(SessionError::NotInProgress(other)),
        }
    }

    fn unanswered_question(&self) -> Result<&Question, SessionError> {
        self.ensure_in_progress()?;
        if self.is_current_answered() {
            return Err(SessionError::AlreadyAnswered);
        }
        self.current_question()
            .ok_or(SessionError::NotInProgress(self.state))
    }

    fn move_forward(&mut self) -> SessionState {
        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            self.state = SessionState::Completed;
            debug!(session = %self.id, score = self.score, "session completed");
        }
        self.state
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Questions of the current run, in play order.
    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    /// The active question, if the session is in progress.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::InProgress => self.questions.get(self.current_index).map(Arc::as_ref),
            _ => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether the active question already has an answer waiting for
    /// [`Session::advance`].
    pub fn is_current_answered(&self) -> bool {
        self.state == SessionState::InProgress && self.log.len() > self.current_index
    }

    /// Outcome of the active question once answered.
    pub fn current_record(&self) -> Option<&AnswerRecord> {
        if self.is_current_answered() {
            self.log.get(self.current_index)
        } else {
            None
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn progress(&self) -> Progress {
        let total = self.total();
        Progress {
            position: (self.current_index + 1).min(total),
            total,
        }
    }

    pub fn log(&self) -> &[AnswerRecord] {
        &self.log
    }

    /// Final figures; only available once completed.
    pub fn results(&self) -> Result<QuizResults, SessionError> {
        if self.state != SessionState::Completed {
            return Err(SessionError::NotCompleted);
        }
        let total = self.total();
        Ok(QuizResults {
            score: self.score,
            total,
            percentage: percentage(self.score, total),
            breakdown: self.log.clone(),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::RecordOutcome;

    fn question(id: i64, text: &str, choices: &[&str], correct: usize) -> Arc<Question> {
        Arc::new(
            Question::new(
                id,
                text,
                choices.iter().map(|c| c.to_string()).collect(),
                correct,
                None,
            )
            .unwrap(),
        )
    }

    fn one_plus_one() -> Vec<Arc<Question>> {
        vec![question(0, "1+1?", &["1", "2", "3"], 1)]
    }

    fn three_questions() -> Vec<Arc<Question>> {
        vec![
            question(1, "a?", &["x", "y"], 0),
            question(2, "b?", &["x", "y"], 1),
            question(3, "c?", &["x", "y", "z"], 2),
        ]
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.current_question().is_none());
        assert_eq!(session.results(), Err(SessionError::NotCompleted));
    }

    #[test]
    fn test_start_rejects_empty_set() {
        let mut session = Session::new();
        assert_eq!(session.start(&[]), Err(SessionError::NoQuestions));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_correct_answer_then_advance_completes() {
        let mut session = Session::new();
        assert_eq!(session.start(&one_plus_one()), Ok(SessionState::InProgress));
        assert_eq!(session.current_index(), 0);

        let outcome = session.answer(1).unwrap();
        assert!(outcome.correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.state(), SessionState::InProgress);

        assert_eq!(session.advance(), Ok(SessionState::Completed));
        let results = session.results().unwrap();
        assert_eq!(results.score, 1);
        assert_eq!(results.total, 1);
        assert_eq!(results.percentage, 100);
    }

    #[test]
    fn test_wrong_answer_reports_correct_choice() {
        let mut session = Session::new();
        session.start(&one_plus_one()).unwrap();

        let outcome = session.answer(0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_answer, "2");
        assert_eq!(outcome.feedback(), "Wrong. Correct answer: 2");
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_double_answer_is_rejected() {
        let mut session = Session::new();
        session.start(&one_plus_one()).unwrap();
        session.answer(1).unwrap();

        assert_eq!(session.answer(1), Err(SessionError::AlreadyAnswered));
        assert_eq!(session.score(), 1);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_out_of_range_choice_is_rejected() {
        let mut session = Session::new();
        session.start(&one_plus_one()).unwrap();

        assert_eq!(
            session.answer(3),
            Err(SessionError::ChoiceOutOfRange {
                index: 3,
                choices: 3
            })
        );
        assert!(session.log().is_empty());
        assert!(!session.is_current_answered());
    }

    #[test]
    fn test_advance_requires_answer() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();

        assert_eq!(session.advance(), Err(SessionError::NotAnswered));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_skip_after_answer_is_rejected() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();
        session.answer(0).unwrap();

        assert_eq!(session.skip(), Err(SessionError::AlreadyAnswered));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_skip_self_advances() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();

        assert_eq!(session.skip(), Ok(SessionState::InProgress));
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.score(), 0);
        assert!(session.log()[0].is_skipped());
    }

    #[test]
    fn test_three_skips_complete_the_run() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();

        session.skip().unwrap();
        session.skip().unwrap();
        assert_eq!(session.skip(), Ok(SessionState::Completed));

        let results = session.results().unwrap();
        assert_eq!(results.score, 0);
        assert_eq!(results.skipped_count(), 3);
        assert!(results.breakdown.iter().all(|r| r.outcome == RecordOutcome::Skipped));
    }

    #[test]
    fn test_operations_after_completion_are_rejected() {
        let mut session = Session::new();
        session.start(&one_plus_one()).unwrap();
        session.skip().unwrap();

        assert_eq!(
            session.answer(0),
            Err(SessionError::NotInProgress(SessionState::Completed))
        );
        assert_eq!(
            session.skip(),
            Err(SessionError::NotInProgress(SessionState::Completed))
        );
        assert_eq!(
            session.advance(),
            Err(SessionError::NotInProgress(SessionState::Completed))
        );
    }

    #[test]
    fn test_results_are_idempotent() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();
        session.answer(0).unwrap();
        session.advance().unwrap();
        session.skip().unwrap();
        session.answer(1).unwrap();
        session.advance().unwrap();

        assert_eq!(session.results(), session.results());
    }

    #[test]
    fn test_retry_keeps_order() {
        let mut session = Session::new();
        session
            .start_with_rng(&three_questions(), &mut StdRng::seed_from_u64(3))
            .unwrap();
        let order: Vec<String> = session.questions().iter().map(|q| q.text().to_string()).collect();

        session.answer(0).unwrap();
        session.advance().unwrap();
        session.skip().unwrap();
        session.skip().unwrap();
        assert_eq!(session.state(), SessionState::Completed);

        assert_eq!(session.retry(), Ok(SessionState::InProgress));
        let replay: Vec<String> = session.questions().iter().map(|q| q.text().to_string()).collect();
        assert_eq!(order, replay);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_retry_mid_run_resets_progress() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();
        session.skip().unwrap();

        assert_eq!(session.retry(), Ok(SessionState::InProgress));
        assert_eq!(session.current_index(), 0);
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_retry_without_question_set_fails() {
        let mut session = Session::new();
        assert_eq!(session.retry(), Err(SessionError::NoQuestionSet));

        session.start(&one_plus_one()).unwrap();
        session.restart_to_start();
        assert_eq!(session.retry(), Err(SessionError::NoQuestionSet));
    }

    #[test]
    fn test_restart_to_start_discards_everything() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();
        session.answer(0).unwrap();

        session.restart_to_start();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.score(), 0);
        assert!(session.log().is_empty());
        assert!(session.questions().is_empty());
    }

    #[test]
    fn test_start_mid_run_force_resets() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();
        session.answer(0).unwrap();
        let first_run = session.id();

        assert_eq!(session.start(&one_plus_one()), Ok(SessionState::InProgress));
        assert_ne!(session.id(), first_run);
        assert_eq!(session.total(), 1);
        assert_eq!(session.score(), 0);
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_log_tracks_cursor() {
        let mut session = Session::new();
        session.start(&three_questions()).unwrap();

        assert_eq!(session.log().len(), session.current_index());
        session.answer(1).unwrap();
        assert_eq!(session.log().len(), session.current_index() + 1);
        session.advance().unwrap();
        assert_eq!(session.log().len(), session.current_index());
        session.skip().unwrap();
        assert_eq!(session.log().len(), session.current_index());
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut session = Session::new();
        session.start(&one_plus_one()).unwrap();
        assert_eq!(session.progress(), Progress { position: 1, total: 1 });

        session.skip().unwrap();
        assert_eq!(session.progress(), Progress { position: 1, total: 1 });
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_feedback_uses_explanation() {
        let outcome = AnswerOutcome {
            chosen: 0,
            correct: true,
            correct_index: 0,
            correct_answer: "push()".to_string(),
            explanation: Some("push() appends to the array's end.".to_string()),
        };
        assert_eq!(outcome.feedback(), "Correct! push() appends to the array's end.");
    }
}
