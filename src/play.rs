//! Playing through a level.
//!
//! [`LevelRun`] tracks which questions of a level have been solved.
//! [`ButtonFlowRun`] drives one button-flow question: each press feeds the
//! button's pseudo-command to the repository simulator and advances the
//! click-by-click attempt.

use crate::catalog::{ButtonFlowQuestion, Level, Question};
use crate::evaluator::{evaluate, ButtonFlowAttempt, Correctness, Response};
use crate::repo::{GitRepoState, RepoCommand};
use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

/// One visit to a level.
#[derive(Clone, Debug)]
pub struct LevelRun<'a> {
    level: &'a Level,
    solved: BTreeSet<String>,
}

impl<'a> LevelRun<'a> {
    pub fn new(level: &'a Level) -> Self {
        Self {
            level,
            solved: BTreeSet::new(),
        }
    }

    pub fn level(&self) -> &'a Level {
        self.level
    }

    /// Evaluate a response and remember the question when it is solved.
    ///
    /// Returns `None` for a question id that is not part of the level.
    pub fn submit(&mut self, question_id: &str, response: &Response) -> Option<Correctness> {
        let question = self.level.question(question_id)?;
        let verdict = evaluate(question, response);
        if verdict.is_correct() {
            self.solved.insert(question.id().to_string());
        }
        debug!(
            level = %self.level.id,
            question = question_id,
            verdict = ?verdict,
            "answer submitted"
        );
        Some(verdict)
    }

    /// Start a button-flow question from the level's seed repository.
    pub fn button_flow(&self, question_id: &str) -> Option<ButtonFlowRun<'a>> {
        match self.level.question(question_id)? {
            Question::ButtonFlow(q) => Some(ButtonFlowRun::new(q, self.level.seed_repo())),
            _ => None,
        }
    }

    /// Submit the presses of a finished button-flow run.
    pub fn submit_flow(&mut self, run: &ButtonFlowRun<'_>) -> Option<Correctness> {
        let pressed = Response::Buttons(run.attempt().clicked().to_vec());
        self.submit(&run.question().id, &pressed)
    }

    pub fn is_solved(&self, question_id: &str) -> bool {
        self.solved.contains(question_id)
    }

    /// Questions not solved yet, in level order.
    pub fn remaining(&self) -> impl Iterator<Item = &'a Question> + '_ {
        self.level
            .questions
            .iter()
            .filter(move |q| !self.solved.contains(q.id()))
    }

    /// Whether every question has been solved.
    pub fn is_complete(&self) -> bool {
        self.remaining().next().is_none()
    }
}

/// One attempt at a button-flow question with its simulated repository.
#[derive(Clone, Debug)]
pub struct ButtonFlowRun<'a> {
    question: &'a ButtonFlowQuestion,
    seed: GitRepoState,
    repo: GitRepoState,
    attempt: ButtonFlowAttempt,
}

impl<'a> ButtonFlowRun<'a> {
    pub fn new(question: &'a ButtonFlowQuestion, seed: GitRepoState) -> Self {
        Self {
            question,
            repo: seed.clone(),
            seed,
            attempt: ButtonFlowAttempt::button_flow(),
        }
    }

    pub fn question(&self) -> &'a ButtonFlowQuestion {
        self.question
    }

    pub fn repo(&self) -> &GitRepoState {
        &self.repo
    }

    pub fn attempt(&self) -> &ButtonFlowAttempt {
        &self.attempt
    }

    pub fn status(&self) -> Correctness {
        self.attempt.status()
    }

    /// Press a button.
    ///
    /// Unknown buttons and presses after the attempt has ended change
    /// nothing.
    pub fn press<R: Rng + ?Sized>(&mut self, button_id: &str, rng: &mut R) -> Correctness {
        if self.attempt.status().is_terminal() {
            return self.attempt.status();
        }
        let Some(button) = self.question.button(button_id) else {
            debug!(question = %self.question.id, button = button_id, "unknown button pressed");
            return self.attempt.status();
        };
        if let Some(command) = &button.command {
            self.repo = self.repo.apply(&RepoCommand::parse(command), rng);
        }
        self.attempt
            .click(button.id.clone(), &self.question.expected_sequence)
    }

    /// Clear the presses and restore the seed repository.
    pub fn reset(&mut self) {
        self.attempt.reset();
        self.repo = self.seed.clone();
    }
}
