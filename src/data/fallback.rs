//! Built-in question set used when no external source is usable.

use std::sync::Arc;

use tracing::error;

use crate::models::Question;

use super::QuestionSet;

struct BuiltinQuestion {
    id: i64,
    text: &'static str,
    choices: &'static [&'static str],
    correct_index: usize,
    explanation: &'static str,
}

const BUILTIN_QUESTIONS: &[BuiltinQuestion] = &[
    BuiltinQuestion {
        id: 1,
        text: "What is the output of: console.log(typeof []);",
        choices: &["'object'", "'array'", "'list'", "'undefined'"],
        correct_index: 0,
        explanation: "In JS arrays are objects; typeof returns 'object'.",
    },
    BuiltinQuestion {
        id: 2,
        text: "Which HTTP status means 'Not Found'?",
        choices: &["200", "301", "404", "500"],
        correct_index: 2,
        explanation: "404 indicates resource not found.",
    },
    BuiltinQuestion {
        id: 3,
        text: "Which method adds an item to the end of an array?",
        choices: &["push()", "pop()", "shift()", "unshift()"],
        correct_index: 0,
        explanation: "push() appends to the array's end.",
    },
];

/// The fallback question set, in source order.
pub fn fallback_questions() -> QuestionSet {
    BUILTIN_QUESTIONS
        .iter()
        .filter_map(|entry| {
            let choices = entry.choices.iter().map(|c| c.to_string()).collect();
            match Question::new(
                entry.id,
                entry.text,
                choices,
                entry.correct_index,
                Some(entry.explanation.to_string()),
            ) {
                Ok(question) => Some(Arc::new(question)),
                Err(err) => {
                    error!(id = entry.id, %err, "dropping invalid built-in question");
                    None
                }
            }
        })
        .collect()
}
