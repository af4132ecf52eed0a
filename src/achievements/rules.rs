//! Achievement unlock rules.
//!
//! Each achievement owns a [`Guard`] over [`GameEvent`]. Rules are pure:
//! they look only at the event, and the monotonic [`AchievementState`]
//! turns repeat triggers into no-ops.

use crate::achievements::{AchievementId, AchievementState};
use crate::config::GameConfig;
use crate::core::Guard;
use crate::settings::Theme;
use chrono::{DateTime, Utc};
use tracing::info;

/// Something that happened during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// An answer was scored; `combo` is the streak after scoring it.
    AnswerRecorded { correct: bool, combo: u32 },
    /// A level moved to completed for the first time.
    LevelCompleted { level_id: String },
    /// A challenge session reached its result.
    ChallengeFinished { questions: usize, correct: usize },
    /// The active theme was set.
    ThemeChanged { from: Theme, to: Theme },
}

/// One guard per achievement.
#[derive(Debug)]
pub struct AchievementRules {
    rules: Vec<(AchievementId, Guard<GameEvent>)>,
}

impl Default for AchievementRules {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl AchievementRules {
    pub fn new(config: &GameConfig) -> Self {
        let combo_threshold = config.combo_threshold;
        let full_clear_min = config.full_clear_min_questions;

        let rules = vec![
            (
                AchievementId::FirstCorrect,
                Guard::new(|e: &GameEvent| {
                    matches!(e, GameEvent::AnswerRecorded { correct: true, .. })
                }),
            ),
            (
                AchievementId::FirstLevelComplete,
                Guard::new(|e: &GameEvent| matches!(e, GameEvent::LevelCompleted { .. })),
            ),
            (
                AchievementId::ThreeCombo,
                Guard::new(move |e: &GameEvent| {
                    matches!(e, GameEvent::AnswerRecorded { combo, .. } if *combo >= combo_threshold)
                }),
            ),
            (
                AchievementId::ChallengeFullClear,
                Guard::new(move |e: &GameEvent| {
                    matches!(
                        e,
                        GameEvent::ChallengeFinished { questions, correct }
                            if *questions >= full_clear_min && correct == questions
                    )
                }),
            ),
            (
                AchievementId::ThemeSwitcher,
                Guard::new(|e: &GameEvent| {
                    matches!(e, GameEvent::ThemeChanged { from, to } if from != to)
                }),
            ),
        ];

        Self { rules }
    }

    /// Achievements whose rule holds for `event`, locked or not.
    pub fn triggered(&self, event: &GameEvent) -> Vec<AchievementId> {
        self.rules
            .iter()
            .filter(|(_, guard)| guard.check(event))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Unlock everything `event` earns.
    ///
    /// Returns the new state and the achievements unlocked by this call.
    pub fn apply(
        &self,
        state: &AchievementState,
        event: &GameEvent,
        at: DateTime<Utc>,
    ) -> (AchievementState, Vec<AchievementId>) {
        let mut next = state.clone();
        let mut unlocked = Vec::new();
        for id in self.triggered(event) {
            let (updated, newly) = next.unlock(id, at);
            next = updated;
            if newly {
                info!(achievement = id.as_str(), name = id.name(), "achievement unlocked");
                unlocked.push(id);
            }
        }
        (next, unlocked)
    }
}
