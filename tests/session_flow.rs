use std::sync::Arc;

use quiz_runner::{
    Question, RecordOutcome, Session, SessionError, SessionState, fallback_questions,
    parse_questions, percentage,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn numbered_questions(count: usize) -> Vec<Arc<Question>> {
    (0..count)
        .map(|i| {
            Arc::new(
                Question::new(
                    i as i64,
                    format!("Question {}?", i),
                    vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    i % 3,
                    None,
                )
                .unwrap(),
            )
        })
        .collect()
}

#[test]
fn random_play_respects_session_invariants() {
    let mut rng = StdRng::seed_from_u64(99);

    for size in 1..=12 {
        let questions = numbered_questions(size);
        let mut session = Session::new();
        session.start_with_rng(&questions, &mut rng).unwrap();

        let mut last_index = 0;
        let mut correct = 0;
        while session.state() == SessionState::InProgress {
            assert!(session.current_index() >= last_index);
            last_index = session.current_index();

            if rng.random_bool(0.25) {
                session.skip().unwrap();
            } else {
                let choice = rng.random_range(0..3);
                if session.answer(choice).unwrap().correct {
                    correct += 1;
                }
                session.advance().unwrap();
            }
            assert_eq!(session.log().len(), session.current_index());
        }

        let results = session.results().unwrap();
        assert_eq!(results.total, size);
        assert_eq!(results.score, correct);
        assert!(results.score <= size);
        assert_eq!(results.breakdown.len(), size);
        assert_eq!(results.percentage, percentage(correct, size));
    }
}

#[test]
fn session_shares_question_records() {
    let questions = numbered_questions(4);
    let mut session = Session::new();
    session.start(&questions).unwrap();

    for played in session.questions() {
        assert!(questions.iter().any(|q| Arc::ptr_eq(q, played)));
    }
}

#[test]
fn loaded_document_plays_through() {
    let questions = parse_questions(
        r#"[{"text":"1+1?","choices":["1","2","3"],"correctIndex":1}]"#,
    )
    .unwrap();

    let mut session = Session::new();
    session.start(&questions).unwrap();
    let outcome = session.answer(0).unwrap();
    assert!(!outcome.correct);
    assert_eq!(outcome.correct_answer, "2");
    session.advance().unwrap();

    let results = session.results().unwrap();
    assert_eq!((results.score, results.total, results.percentage), (0, 1, 0));
    assert!(matches!(
        &results.breakdown[0].outcome,
        RecordOutcome::Answered { chosen: 0, correct: false, correct_answer, .. } if correct_answer == "2"
    ));
}

#[test]
fn rejected_commands_leave_state_untouched() {
    let mut session = Session::new();
    session.start(&fallback_questions()).unwrap();
    session.answer(0).unwrap();
    let score = session.score();

    assert_eq!(session.answer(1), Err(SessionError::AlreadyAnswered));
    assert_eq!(session.skip(), Err(SessionError::AlreadyAnswered));
    assert_eq!(session.score(), score);
    assert_eq!(session.log().len(), 1);
    assert_eq!(session.current_index(), 0);
}
