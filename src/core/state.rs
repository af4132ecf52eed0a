//! Status trait shared by the small state machines of the crate.
//!
//! Levels move `locked → unlocked → completed` and simulated files move
//! between `untracked`, `modified`, `staged` and `committed`. Both are plain
//! enums that implement [`State`] so they can be named in logs and recorded
//! in a [`TransitionLog`](super::TransitionLog).

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. States are immutable values describing where an
/// entity currently sits in its lifecycle.
///
/// # Example
///
/// ```rust
/// use gitquest::core::{LevelStatus, State};
///
/// assert_eq!(LevelStatus::Unlocked.name(), "unlocked");
/// assert!(LevelStatus::Completed.is_final());
/// assert!(!LevelStatus::Locked.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Stable lowercase name used in logs and serialized records.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// No transition leaves a final state. Default implementation returns
    /// `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Derived status of a single level.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStatus {
    Locked,
    Unlocked,
    Completed,
}

impl State for LevelStatus {
    fn name(&self) -> &str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Completed => "completed",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl LevelStatus {
    /// Whether the level can be entered.
    pub fn is_playable(&self) -> bool {
        !matches!(self, Self::Locked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_status_names_are_lowercase() {
        assert_eq!(LevelStatus::Locked.name(), "locked");
        assert_eq!(LevelStatus::Unlocked.name(), "unlocked");
        assert_eq!(LevelStatus::Completed.name(), "completed");
    }

    #[test]
    fn only_completed_is_final() {
        assert!(!LevelStatus::Locked.is_final());
        assert!(!LevelStatus::Unlocked.is_final());
        assert!(LevelStatus::Completed.is_final());
    }

    #[test]
    fn locked_levels_are_not_playable() {
        assert!(!LevelStatus::Locked.is_playable());
        assert!(LevelStatus::Unlocked.is_playable());
        assert!(LevelStatus::Completed.is_playable());
    }

    #[test]
    fn status_serializes_as_its_name() {
        let json = serde_json::to_string(&LevelStatus::Unlocked).unwrap();
        assert_eq!(json, "\"unlocked\"");

        let back: LevelStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LevelStatus::Unlocked);
    }
}
