//! The player session: single owner of every mutable record.
//!
//! A [`Session`] loads progress, achievements and settings from a
//! [`KeyValueStore`] when opened and writes the affected record back after
//! every mutation. Writes are best-effort: a failure is logged at `warn` and
//! the in-memory state stays authoritative.
//!
//! # Example
//!
//! ```rust
//! use gitquest::achievements::AchievementId;
//! use gitquest::catalog::builtin;
//! use gitquest::persistence::MemoryStore;
//! use gitquest::{GameConfig, Session};
//!
//! let mut session = Session::open(builtin().unwrap(), GameConfig::default(), MemoryStore::new()).unwrap();
//! assert!(session.progress().is_unlocked("level-1"));
//!
//! let unlocked = session.complete_level("level-1");
//! assert_eq!(unlocked, vec![AchievementId::FirstLevelComplete]);
//! assert!(session.progress().is_unlocked("level-2"));
//! ```

use crate::achievements::{AchievementId, AchievementRules, AchievementState, GameEvent};
use crate::catalog::LevelCatalog;
use crate::challenge::{AnswerOutcome, ChallengeSession, ChallengeSummary, TimedChallenge};
use crate::config::{ConfigError, GameConfig};
use crate::core::{LevelStatus, TransitionLog};
use crate::persistence::{self, KeyValueStore, PersistenceError};
use crate::play::LevelRun;
use crate::progress::{ProgressState, ProgressionEngine};
use crate::scoring::Scoreboard;
use crate::settings::{LearningMode, Settings, Theme};
use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

pub struct Session<S: KeyValueStore> {
    catalog: LevelCatalog,
    config: GameConfig,
    rules: AchievementRules,
    store: S,
    progress: ProgressState,
    achievements: AchievementState,
    settings: Settings,
    score: Scoreboard,
    log: TransitionLog<LevelStatus>,
}

fn loaded<T>(record: &str, result: Result<Option<T>, PersistenceError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(record, error = %e, "could not load record; starting fresh");
            None
        }
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Load the stored records, initializing progress on first run.
    pub fn open(catalog: LevelCatalog, config: GameConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let stored_progress = loaded(
            persistence::PROGRESS_RECORD,
            persistence::load_progress(&store, &config),
        );
        let achievements = loaded(
            persistence::ACHIEVEMENTS_RECORD,
            persistence::load_achievements(&store, &config),
        )
        .unwrap_or_default();
        let settings = loaded(
            persistence::SETTINGS_RECORD,
            persistence::load_settings(&store, &config),
        )
        .unwrap_or_default();

        let first_run = stored_progress.is_none();
        let progress = ProgressionEngine::new(&catalog)
            .initialize(&stored_progress.clone().unwrap_or_default());

        let mut session = Self {
            rules: AchievementRules::new(&config),
            catalog,
            config,
            store,
            progress,
            achievements,
            settings,
            score: Scoreboard::new(),
            log: TransitionLog::new(),
        };
        if first_run || stored_progress.as_ref() != Some(&session.progress) {
            session.save_progress();
        }
        debug!(
            unlocked = session.progress.unlocked_level_ids.len(),
            completed = session.progress.completed_level_ids.len(),
            first_run,
            "session opened"
        );
        Ok(session)
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn achievements(&self) -> &AchievementState {
        &self.achievements
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    /// Level status changes made during this session.
    pub fn log(&self) -> &TransitionLog<LevelStatus> {
        &self.log
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn engine(&self) -> ProgressionEngine<'_> {
        ProgressionEngine::new(&self.catalog)
    }

    pub fn status_of(&self, level_id: &str) -> Option<LevelStatus> {
        self.engine().status_of(&self.progress, level_id)
    }

    /// Begin a level; locked and unknown levels cannot be played.
    pub fn start_level(&self, level_id: &str) -> Option<LevelRun<'_>> {
        let level = self.catalog.get(level_id)?;
        if !self.progress.status(level_id).is_playable() {
            debug!(level = level_id, "level is locked");
            return None;
        }
        Some(LevelRun::new(level))
    }

    /// Complete a level and unlock whatever it opens up.
    pub fn complete_level(&mut self, level_id: &str) -> Vec<AchievementId> {
        let was_completed = self.progress.is_completed(level_id);
        let next = self.engine().complete_level(&self.progress, level_id);
        if !self.replace_progress(next) {
            return Vec::new();
        }
        if was_completed || !self.progress.is_completed(level_id) {
            return Vec::new();
        }
        self.handle(GameEvent::LevelCompleted {
            level_id: level_id.to_string(),
        })
    }

    pub fn unlock_level(&mut self, level_id: &str) {
        let next = self.engine().unlock_level(&self.progress, level_id);
        self.replace_progress(next);
    }

    /// Back to the first level. Achievements are kept.
    pub fn reset_progress(&mut self) {
        let next = self.engine().reset_progress();
        self.replace_progress(next);
    }

    pub fn reset_achievements(&mut self) {
        self.achievements = self.achievements.reset();
        self.save_achievements();
    }

    /// Score an answer given while playing a level.
    pub fn record_answer(&mut self, correct: bool) -> Vec<AchievementId> {
        self.score = self.score.record(correct);
        self.handle(GameEvent::AnswerRecorded {
            correct,
            combo: self.score.combo,
        })
    }

    /// Draw a challenge from every question of the catalog.
    pub fn start_challenge<R: Rng + ?Sized>(&self, rng: &mut R) -> ChallengeSession {
        let pool: Vec<_> = self.catalog.questions().cloned().collect();
        ChallengeSession::start(&pool, &self.config, rng)
    }

    /// Score the current challenge question.
    ///
    /// When this answer finishes the session, the full-clear rule sees the
    /// final counters.
    pub fn record_challenge_answer(
        &mut self,
        challenge: &mut ChallengeSession,
        correct: bool,
    ) -> Vec<AchievementId> {
        let outcome = challenge.answer_current(correct);
        self.challenge_events(outcome, challenge.summary())
    }

    /// Draw a challenge whose clock ticks at the configured interval.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start_timed_challenge<R: Rng + ?Sized>(&self, rng: &mut R) -> TimedChallenge {
        let pool: Vec<_> = self.catalog.questions().cloned().collect();
        TimedChallenge::start(&pool, &self.config, rng)
    }

    /// Score the current question of a timed challenge; the clock stops
    /// on the last answer.
    pub fn record_timed_challenge_answer(
        &mut self,
        challenge: &mut TimedChallenge,
        correct: bool,
    ) -> Vec<AchievementId> {
        let outcome = challenge.answer_current(correct);
        self.challenge_events(outcome, challenge.session().summary())
    }

    fn challenge_events(
        &mut self,
        outcome: Option<AnswerOutcome>,
        summary: ChallengeSummary,
    ) -> Vec<AchievementId> {
        let Some(outcome) = outcome else {
            return Vec::new();
        };
        let mut unlocked = self.handle(GameEvent::AnswerRecorded {
            correct: outcome.correct,
            combo: outcome.score.combo,
        });
        if outcome.finished {
            unlocked.extend(self.handle(GameEvent::ChallengeFinished {
                questions: summary.questions,
                correct: summary.correct,
            }));
        }
        unlocked
    }

    pub fn change_theme(&mut self, theme: Theme) -> Vec<AchievementId> {
        let from = self.settings.theme;
        self.settings = self.settings.with_theme(theme);
        self.save_settings();
        self.handle(GameEvent::ThemeChanged { from, to: theme })
    }

    pub fn set_learning_mode(&mut self, mode: LearningMode) {
        self.settings = self.settings.with_learning_mode(mode);
        self.save_settings();
    }

    pub fn mark_intro_seen(&mut self) {
        self.settings = self.settings.with_intro_seen(true);
        self.save_settings();
    }

    fn replace_progress(&mut self, next: ProgressState) -> bool {
        if next == self.progress {
            return false;
        }
        let changes = self.engine().changes(&self.progress, &next, Utc::now());
        self.log = self.log.record_all(changes);
        self.progress = next;
        self.save_progress();
        true
    }

    fn handle(&mut self, event: GameEvent) -> Vec<AchievementId> {
        let (next, unlocked) = self.rules.apply(&self.achievements, &event, Utc::now());
        if !unlocked.is_empty() {
            self.achievements = next;
            self.save_achievements();
        }
        unlocked
    }

    fn save_progress(&mut self) {
        let result = persistence::save_progress(&mut self.store, &self.config, &self.progress);
        Self::report(persistence::PROGRESS_RECORD, result);
    }

    fn save_achievements(&mut self) {
        let result =
            persistence::save_achievements(&mut self.store, &self.config, &self.achievements);
        Self::report(persistence::ACHIEVEMENTS_RECORD, result);
    }

    fn save_settings(&mut self) {
        let result = persistence::save_settings(&mut self.store, &self.config, &self.settings);
        Self::report(persistence::SETTINGS_RECORD, result);
    }

    fn report(record: &str, result: Result<(), PersistenceError>) {
        if let Err(e) = result {
            warn!(record, error = %e, "could not save record");
        }
    }
}
