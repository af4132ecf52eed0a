//! Status change history.
//!
//! An immutable, timestamped log of status changes keyed by the subject
//! (a level id, a file id) that changed.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single status change.
///
/// # Example
///
/// ```rust
/// use gitquest::core::{LevelStatus, StatusChange};
/// use chrono::Utc;
///
/// let change = StatusChange {
///     subject: "level-2".to_string(),
///     from: LevelStatus::Locked,
///     to: LevelStatus::Unlocked,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(change.subject, "level-2");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusChange<S: State> {
    /// Identifier of the entity whose status changed
    pub subject: String,
    /// The status being left
    pub from: S,
    /// The status being entered
    pub to: S,
    /// When the change was observed
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of status changes.
///
/// The log is immutable: [`TransitionLog::record_all`] returns a new log
/// with the changes appended and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use gitquest::core::{LevelStatus, StatusChange, TransitionLog};
/// use chrono::Utc;
///
/// let log = TransitionLog::new().record_all(vec![
///     StatusChange {
///         subject: "level-1".to_string(),
///         from: LevelStatus::Locked,
///         to: LevelStatus::Unlocked,
///         timestamp: Utc::now(),
///     },
///     StatusChange {
///         subject: "level-1".to_string(),
///         from: LevelStatus::Unlocked,
///         to: LevelStatus::Completed,
///         timestamp: Utc::now(),
///     },
/// ]);
///
/// let path = log.path_of("level-1");
/// assert_eq!(path, vec![&LevelStatus::Locked, &LevelStatus::Unlocked, &LevelStatus::Completed]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionLog<S: State> {
    changes: Vec<StatusChange<S>>,
}

impl<S: State> Default for TransitionLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionLog<S> {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Record several changes at once, returning a new log.
    pub fn record_all<I>(&self, changes: I) -> Self
    where
        I: IntoIterator<Item = StatusChange<S>>,
    {
        let mut all = self.changes.clone();
        all.extend(changes);
        Self { changes: all }
    }

    /// Statuses traversed by one subject, in order.
    ///
    /// Starts with the `from` status of the subject's first change, followed
    /// by the `to` status of each of its changes. Empty when the subject
    /// never changed.
    pub fn path_of(&self, subject: &str) -> Vec<&S> {
        let mut path = Vec::new();
        let mut own = self.changes.iter().filter(|c| c.subject == subject);
        if let Some(first) = own.next() {
            path.push(&first.from);
            path.push(&first.to);
        }
        for change in own {
            path.push(&change.to);
        }
        path
    }

    /// All recorded changes, oldest first.
    pub fn changes(&self) -> &[StatusChange<S>] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
