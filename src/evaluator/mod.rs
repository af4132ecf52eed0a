//! Answer evaluation.
//!
//! [`evaluate`] decides the correctness of a response for every question
//! variant. It is pure and total: a wrong answer is an ordinary value, never
//! an error.
//!
//! # Example
//!
//! ```rust
//! use gitquest::catalog::{InputCommandQuestion, Question};
//! use gitquest::evaluator::{evaluate, Correctness, Response};
//!
//! let question = Question::InputCommand(InputCommandQuestion {
//!     id: "q".to_string(),
//!     title: "Stage everything".to_string(),
//!     description: None,
//!     prompt: "Stage all changes".to_string(),
//!     correct_answers: vec!["git add .".to_string()],
//!     hint: None,
//! });
//!
//! let verdict = evaluate(&question, &Response::Text("  git   add   . ".to_string()));
//! assert_eq!(verdict, Correctness::Complete);
//! ```

mod attempt;

pub use attempt::{ButtonFlowAttempt, OrderingAttempt, SequenceAttempt};

use crate::catalog::Question;
use serde::{Deserialize, Serialize};

/// Classification of a (possibly partial) answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Correctness {
    /// Fully answered and correct.
    Complete,
    /// Fully answered (or overshot) and wrong.
    Incorrect,
    /// Not finished yet, but already diverged from the answer.
    PartialIncorrect,
    /// A valid prefix of the answer.
    InProgress,
    /// Input was blank after normalization.
    Empty,
}

impl Correctness {
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether the attempt is over: either solved or failed.
    ///
    /// A failed attempt must be reset before it accepts more input.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete | Self::Incorrect | Self::PartialIncorrect
        )
    }

    /// Whether this outcome counts as a wrong answer for scoring.
    pub fn is_wrong(&self) -> bool {
        matches!(self, Self::Incorrect | Self::PartialIncorrect)
    }
}

/// A user's answer to one question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Response {
    /// Chosen option index of a single-choice question.
    Choice(usize),
    /// Clicked step indices of an ordering question, in click order.
    Steps(Vec<usize>),
    /// Pressed button ids of a button-flow question, in press order.
    Buttons(Vec<String>),
    /// Typed command of an input question.
    Text(String),
}

/// Trim the input and collapse every inner whitespace run to one space.
///
/// ```rust
/// use gitquest::evaluator::normalize_command;
///
/// assert_eq!(normalize_command("  git \t add   . "), "git add .");
/// ```
pub fn normalize_command(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classify a click sequence against the expected sequence.
pub fn classify_prefix<T: PartialEq>(clicked: &[T], expected: &[T]) -> Correctness {
    use std::cmp::Ordering;

    match clicked.len().cmp(&expected.len()) {
        Ordering::Equal if clicked == expected => Correctness::Complete,
        Ordering::Equal | Ordering::Greater => Correctness::Incorrect,
        Ordering::Less if expected.starts_with(clicked) => Correctness::InProgress,
        Ordering::Less => Correctness::PartialIncorrect,
    }
}

/// Keep the first occurrence of every element, preserving order.
fn first_occurrences(items: &[usize]) -> Vec<usize> {
    let mut kept = Vec::with_capacity(items.len());
    for &item in items {
        if !kept.contains(&item) {
            kept.push(item);
        }
    }
    kept
}

/// Decide correctness of `response` for `question`.
///
/// A response of the wrong shape for the question is [`Correctness::Incorrect`].
pub fn evaluate(question: &Question, response: &Response) -> Correctness {
    match (question, response) {
        (Question::SingleChoice(q), Response::Choice(index)) => {
            if *index == q.correct_answer {
                Correctness::Complete
            } else {
                Correctness::Incorrect
            }
        }
        (Question::Ordering(q), Response::Steps(steps)) => {
            classify_prefix(&first_occurrences(steps), &q.correct_order)
        }
        (Question::ButtonFlow(q), Response::Buttons(pressed)) => {
            classify_prefix(pressed, &q.expected_sequence)
        }
        (Question::InputCommand(q), Response::Text(text)) => {
            let typed = normalize_command(text);
            if typed.is_empty() {
                return Correctness::Empty;
            }
            let accepted = q
                .correct_answers
                .iter()
                .any(|answer| normalize_command(answer) == typed);
            if accepted {
                Correctness::Complete
            } else {
                Correctness::Incorrect
            }
        }
        _ => {
            tracing::debug!(
                question = question.id(),
                kind = question.kind(),
                "response shape does not match question"
            );
            Correctness::Incorrect
        }
    }
}
