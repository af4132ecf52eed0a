//! Achievements.
//!
//! [`AchievementState`] is a monotonic map from [`AchievementId`] to an
//! unlock flag and timestamp. Unlocking is idempotent and the first unlock
//! timestamp is never overwritten. [`AchievementRules`] decides which
//! achievements a [`GameEvent`] earns.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use gitquest::achievements::{AchievementId, AchievementState};
//!
//! let state = AchievementState::new();
//! let (state, newly) = state.unlock(AchievementId::FirstCorrect, Utc::now());
//! assert!(newly);
//!
//! let (again, newly) = state.unlock(AchievementId::FirstCorrect, Utc::now());
//! assert!(!newly);
//! assert_eq!(again, state);
//! ```

pub mod rules;

pub use rules::{AchievementRules, GameEvent};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The fixed achievement catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstCorrect,
    FirstLevelComplete,
    ThreeCombo,
    #[serde(rename = "challenge_3_correct")]
    ChallengeFullClear,
    ThemeSwitcher,
}

impl AchievementId {
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstCorrect,
        AchievementId::FirstLevelComplete,
        AchievementId::ThreeCombo,
        AchievementId::ChallengeFullClear,
        AchievementId::ThemeSwitcher,
    ];

    /// Stable id used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstCorrect => "first_correct",
            Self::FirstLevelComplete => "first_level_complete",
            Self::ThreeCombo => "three_combo",
            Self::ChallengeFullClear => "challenge_3_correct",
            Self::ThemeSwitcher => "theme_switcher",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstCorrect => "First Correct Answer",
            Self::FirstLevelComplete => "First Level Cleared",
            Self::ThreeCombo => "Triple Combo",
            Self::ChallengeFullClear => "Flawless Challenge",
            Self::ThemeSwitcher => "Theme Explorer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstCorrect => "Answer a question correctly for the first time",
            Self::FirstLevelComplete => "Complete any level",
            Self::ThreeCombo => "Answer 3 questions correctly in a row",
            Self::ChallengeFullClear => "Answer every question of a random challenge correctly",
            Self::ThemeSwitcher => "Switch the theme for the first time",
        }
    }
}

/// Unlock status of one achievement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementEntry {
    pub id: AchievementId,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementEntry {
    fn locked(id: AchievementId) -> Self {
        Self {
            id,
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// Persisted achievement record: `{ achievements: [{ id, unlocked, date? }] }`.
///
/// Ids stay plain strings so records written by other versions still load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    #[serde(default)]
    pub achievements: Vec<AchievementRecordEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecordEntry {
    pub id: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Unlock state of every achievement, in catalog order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AchievementRecord", into = "AchievementRecord")]
pub struct AchievementState {
    entries: Vec<AchievementEntry>,
}

impl Default for AchievementState {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementState {
    /// Every achievement locked.
    pub fn new() -> Self {
        Self {
            entries: AchievementId::ALL
                .into_iter()
                .map(AchievementEntry::locked)
                .collect(),
        }
    }

    pub fn entries(&self) -> &[AchievementEntry] {
        &self.entries
    }

    pub fn entry(&self, id: AchievementId) -> Option<&AchievementEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.entry(id).is_some_and(|e| e.unlocked)
    }

    pub fn unlocked_at(&self, id: AchievementId) -> Option<DateTime<Utc>> {
        self.entry(id).and_then(|e| e.unlocked_at)
    }

    pub fn unlocked_ids(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.entries.iter().filter(|e| e.unlocked).map(|e| e.id)
    }

    /// Unlock `id` at time `at`.
    ///
    /// Returns the new state and whether this call changed anything. An
    /// already unlocked achievement keeps its original timestamp.
    pub fn unlock(&self, id: AchievementId, at: DateTime<Utc>) -> (Self, bool) {
        if self.is_unlocked(id) {
            return (self.clone(), false);
        }
        let entries = self
            .entries
            .iter()
            .map(|e| {
                if e.id == id {
                    AchievementEntry {
                        id,
                        unlocked: true,
                        unlocked_at: Some(at),
                    }
                } else {
                    e.clone()
                }
            })
            .collect();
        debug!(achievement = id.as_str(), "achievement state changed");
        (Self { entries }, true)
    }

    /// Relock everything.
    pub fn reset(&self) -> Self {
        Self::new()
    }

    pub fn to_record(&self) -> AchievementRecord {
        AchievementRecord::from(self.clone())
    }
}

impl From<AchievementRecord> for AchievementState {
    fn from(record: AchievementRecord) -> Self {
        let mut state = AchievementState::new();
        for stored in record.achievements {
            let Some(id) = AchievementId::parse(&stored.id) else {
                debug!(achievement = %stored.id, "skipping unknown achievement id");
                continue;
            };
            // Repeated ids merge: unlocked wins and the earliest date is kept.
            if !stored.unlocked {
                continue;
            }
            if let Some(entry) = state.entries.iter_mut().find(|e| e.id == id) {
                entry.unlocked = true;
                entry.unlocked_at = match (entry.unlocked_at, stored.date) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
            }
        }
        state
    }
}

impl From<AchievementState> for AchievementRecord {
    fn from(state: AchievementState) -> Self {
        AchievementRecord {
            achievements: state
                .entries
                .into_iter()
                .map(|e| AchievementRecordEntry {
                    id: e.id.as_str().to_string(),
                    unlocked: e.unlocked,
                    date: e.unlocked_at,
                })
                .collect(),
        }
    }
}
