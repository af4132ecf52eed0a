//! Random challenge sessions.
//!
//! A session draws a uniform number of questions (between the configured
//! bounds, clamped to the pool size) without replacement from the whole
//! question pool, then scores answers in order.
//!
//! # Example
//!
//! ```rust
//! use gitquest::catalog::builtin;
//! use gitquest::challenge::ChallengeSession;
//! use gitquest::GameConfig;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let catalog = builtin().unwrap();
//! let pool: Vec<_> = catalog.questions().cloned().collect();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let mut session = ChallengeSession::start(&pool, &GameConfig::default(), &mut rng);
//! while !session.is_finished() {
//!     session.answer_current(true);
//! }
//! let summary = session.summary();
//! assert_eq!(summary.correct, summary.questions);
//! ```

mod timer;

pub use timer::{format_elapsed, ElapsedTimer};

use crate::catalog::Question;
use crate::config::GameConfig;
use crate::scoring::Scoreboard;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Result of scoring one challenge answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub correct: bool,
    /// Counters after this answer.
    pub score: Scoreboard,
    /// Whether this answer ended the session.
    pub finished: bool,
}

/// Final tally of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSummary {
    pub questions: usize,
    pub correct: usize,
    pub wrong: usize,
    pub full_clear: bool,
}

#[derive(Clone, Debug)]
pub struct ChallengeSession {
    questions: Vec<Question>,
    answered: Vec<bool>,
    current: usize,
    score: Scoreboard,
    min_questions: usize,
    max_questions: usize,
    full_clear_min: usize,
}

impl ChallengeSession {
    /// Draw a new session from `pool`.
    ///
    /// An empty pool gives a session that is already finished.
    pub fn start<R: Rng + ?Sized>(pool: &[Question], config: &GameConfig, rng: &mut R) -> Self {
        let mut session = Self {
            questions: Vec::new(),
            answered: Vec::new(),
            current: 0,
            score: Scoreboard::new(),
            min_questions: config.challenge_min_questions.max(1),
            max_questions: config
                .challenge_max_questions
                .max(config.challenge_min_questions.max(1)),
            full_clear_min: config.full_clear_min_questions,
        };
        session.draw(pool, rng);
        session
    }

    /// Discard all answers and draw a fresh set of questions.
    pub fn restart<R: Rng + ?Sized>(&mut self, pool: &[Question], rng: &mut R) {
        self.draw(pool, rng);
    }

    fn draw<R: Rng + ?Sized>(&mut self, pool: &[Question], rng: &mut R) {
        let count = rng
            .gen_range(self.min_questions..=self.max_questions)
            .min(pool.len());
        self.questions = pool.choose_multiple(rng, count).cloned().collect();
        self.answered = vec![false; self.questions.len()];
        self.current = 0;
        self.score = Scoreboard::new();
        debug!(
            questions = self.questions.len(),
            pool = pool.len(),
            "challenge drawn"
        );
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question waiting for an answer, if any.
    pub fn current(&self) -> Option<&Question> {
        if self.is_finished() {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.answered.iter().all(|a| *a)
    }

    /// Score the current question.
    pub fn answer_current(&mut self, correct: bool) -> Option<AnswerOutcome> {
        self.answer_at(self.current, correct)
    }

    /// Score the question at `position`.
    ///
    /// Returns `None` when the position is out of range or was already
    /// answered.
    pub fn answer_at(&mut self, position: usize, correct: bool) -> Option<AnswerOutcome> {
        let question_id = self.questions.get(position)?.id().to_string();
        if self.answered[position] {
            debug!(question = %question_id, "challenge answer ignored: already answered");
            return None;
        }
        self.answered[position] = true;
        self.score = self.score.record(correct);

        if let Some(next) = self.answered.iter().position(|a| !*a) {
            self.current = next;
        }

        Some(AnswerOutcome {
            question_id,
            correct,
            score: self.score,
            finished: self.is_finished(),
        })
    }

    /// Tally of the answers so far; `full_clear` is only meaningful once
    /// the session is finished.
    pub fn summary(&self) -> ChallengeSummary {
        let questions = self.questions.len();
        let correct = self.score.correct as usize;
        ChallengeSummary {
            questions,
            correct,
            wrong: self.score.wrong as usize,
            full_clear: self.is_finished()
                && questions >= self.full_clear_min
                && correct == questions,
        }
    }
}

/// A challenge session with its elapsed-time ticker.
///
/// The ticker runs at the configured tick interval from the moment the
/// session is drawn and freezes when the last question is answered.
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct TimedChallenge {
    session: ChallengeSession,
    period: Duration,
    timer: ElapsedTimer,
}

impl TimedChallenge {
    pub fn start<R: Rng + ?Sized>(pool: &[Question], config: &GameConfig, rng: &mut R) -> Self {
        let session = ChallengeSession::start(pool, config, rng);
        let period = config.tick_interval();
        Self::with_timer(session, period)
    }

    fn with_timer(session: ChallengeSession, period: Duration) -> Self {
        let mut timer = ElapsedTimer::start(period);
        if session.is_finished() {
            timer.halt();
        }
        Self {
            session,
            period,
            timer,
        }
    }

    /// Redraw the questions and restart the clock from zero.
    pub fn restart<R: Rng + ?Sized>(&mut self, pool: &[Question], rng: &mut R) {
        let mut session = self.session.clone();
        session.restart(pool, rng);
        *self = Self::with_timer(session, self.period);
    }

    pub fn session(&self) -> &ChallengeSession {
        &self.session
    }

    pub fn answer_current(&mut self, correct: bool) -> Option<AnswerOutcome> {
        let outcome = self.session.answer_current(correct);
        self.freeze_if_finished(outcome.as_ref());
        outcome
    }

    pub fn answer_at(&mut self, position: usize, correct: bool) -> Option<AnswerOutcome> {
        let outcome = self.session.answer_at(position, correct);
        self.freeze_if_finished(outcome.as_ref());
        outcome
    }

    fn freeze_if_finished(&mut self, outcome: Option<&AnswerOutcome>) {
        if outcome.is_some_and(|o| o.finished) {
            let secs = self.timer.halt();
            debug!(secs, "challenge clock stopped");
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    /// Elapsed time as `m:ss`.
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_secs())
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }
}
