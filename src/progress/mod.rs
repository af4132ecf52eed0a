//! Level progression.
//!
//! Each level moves `locked → unlocked → completed`. [`ProgressState`] holds
//! the unlocked and completed sets plus the recommended next level;
//! [`ProgressionEngine`] computes new snapshots from old ones and never
//! mutates its input.
//!
//! # Example
//!
//! ```rust
//! use gitquest::catalog::{LevelBuilder, LevelCatalog};
//! use gitquest::core::LevelStatus;
//! use gitquest::progress::{ProgressState, ProgressionEngine};
//!
//! let catalog = LevelCatalog::new(vec![
//!     LevelBuilder::new("level-1").title("Init").order(1).build().unwrap(),
//!     LevelBuilder::new("level-2")
//!         .title("Add")
//!         .order(2)
//!         .prerequisite("level-1")
//!         .build()
//!         .unwrap(),
//! ])
//! .unwrap();
//! let engine = ProgressionEngine::new(&catalog);
//!
//! let progress = engine.initialize(&ProgressState::default());
//! assert_eq!(engine.status_of(&progress, "level-2"), Some(LevelStatus::Locked));
//!
//! let progress = engine.complete_level(&progress, "level-1");
//! assert_eq!(engine.status_of(&progress, "level-2"), Some(LevelStatus::Unlocked));
//! assert_eq!(progress.current_recommended_level_id.as_deref(), Some("level-2"));
//! ```

use crate::catalog::{Level, LevelCatalog};
use crate::core::{LevelStatus, State, StatusChange};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Persisted progress record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    #[serde(default)]
    pub unlocked_level_ids: BTreeSet<String>,
    #[serde(default)]
    pub completed_level_ids: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_recommended_level_id: Option<String>,
}

impl ProgressState {
    /// True when nothing has been unlocked or completed yet.
    pub fn is_empty(&self) -> bool {
        self.unlocked_level_ids.is_empty() && self.completed_level_ids.is_empty()
    }

    pub fn is_unlocked(&self, level_id: &str) -> bool {
        self.unlocked_level_ids.contains(level_id)
    }

    pub fn is_completed(&self, level_id: &str) -> bool {
        self.completed_level_ids.contains(level_id)
    }

    /// Status of a level id, whether or not it exists in a catalog.
    pub fn status(&self, level_id: &str) -> LevelStatus {
        if self.is_completed(level_id) {
            LevelStatus::Completed
        } else if self.is_unlocked(level_id) {
            LevelStatus::Unlocked
        } else {
            LevelStatus::Locked
        }
    }

    /// Restore `completed ⊆ unlocked` for records written by older clients.
    ///
    /// Returns the repaired state and whether anything changed.
    pub fn repaired(mut self) -> (Self, bool) {
        let missing: Vec<String> = self
            .completed_level_ids
            .difference(&self.unlocked_level_ids)
            .cloned()
            .collect();
        let changed = !missing.is_empty();
        self.unlocked_level_ids.extend(missing);
        (self, changed)
    }
}

/// Computes progress transitions against a level catalog.
#[derive(Clone, Copy, Debug)]
pub struct ProgressionEngine<'a> {
    catalog: &'a LevelCatalog,
}

impl<'a> ProgressionEngine<'a> {
    pub fn new(catalog: &'a LevelCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a LevelCatalog {
        self.catalog
    }

    /// First-run state: only the minimal-order level unlocked and recommended.
    pub fn fresh(&self) -> ProgressState {
        match self.catalog.first() {
            Some(first) => ProgressState {
                unlocked_level_ids: BTreeSet::from([first.id.clone()]),
                completed_level_ids: BTreeSet::new(),
                current_recommended_level_id: Some(first.id.clone()),
            },
            None => ProgressState::default(),
        }
    }

    /// Initialize progress unless some already exists.
    pub fn initialize(&self, state: &ProgressState) -> ProgressState {
        if !state.is_empty() {
            return state.clone();
        }
        self.fresh()
    }

    /// Mark a level completed, unlock every newly eligible level and pick a
    /// new recommendation.
    ///
    /// Completing an already completed or unknown level changes nothing:
    /// no transition leaves a final status.
    pub fn complete_level(&self, state: &ProgressState, level_id: &str) -> ProgressState {
        if state.status(level_id).is_final() {
            return state.clone();
        }
        let Some(level) = self.catalog.get(level_id) else {
            debug!(level = level_id, "complete ignored: unknown level");
            return state.clone();
        };

        let mut next = state.clone();
        next.completed_level_ids.insert(level.id.clone());
        next.unlocked_level_ids.insert(level.id.clone());

        for candidate in self.catalog.levels() {
            if !next.is_unlocked(&candidate.id)
                && candidate.prerequisites_met(&next.completed_level_ids)
            {
                next.unlocked_level_ids.insert(candidate.id.clone());
            }
        }

        next.current_recommended_level_id = self.recommend_after(&next, level);
        info!(
            level = %level.id,
            recommended = next.current_recommended_level_id.as_deref().unwrap_or("none"),
            "level completed"
        );
        next
    }

    fn recommend_after(&self, state: &ProgressState, completed: &Level) -> Option<String> {
        if let Some(next) = self.catalog.next_after(&completed.id) {
            if state.is_unlocked(&next.id) {
                return Some(next.id.clone());
            }
        }
        self.catalog
            .levels()
            .iter()
            .find(|l| state.is_unlocked(&l.id) && !state.is_completed(&l.id))
            .map(|l| l.id.clone())
    }

    /// Unlock a level directly, bypassing prerequisites.
    pub fn unlock_level(&self, state: &ProgressState, level_id: &str) -> ProgressState {
        if state.is_unlocked(level_id) {
            return state.clone();
        }
        if !self.catalog.contains(level_id) {
            debug!(level = level_id, "unlock ignored: unknown level");
            return state.clone();
        }
        let mut next = state.clone();
        next.unlocked_level_ids.insert(level_id.to_string());
        next
    }

    /// Back to the first-run state.
    pub fn reset_progress(&self) -> ProgressState {
        self.fresh()
    }

    /// Status of a catalog level; `None` for unknown ids.
    pub fn status_of(&self, state: &ProgressState, level_id: &str) -> Option<LevelStatus> {
        self.catalog
            .get(level_id)
            .map(|l| state.status(&l.id))
    }

    /// Every level with its status, in catalog order.
    pub fn overview<'s>(
        &'s self,
        state: &'s ProgressState,
    ) -> impl Iterator<Item = (&'a Level, LevelStatus)> + 's {
        self.catalog
            .levels()
            .iter()
            .map(move |l| (l, state.status(&l.id)))
    }

    /// Status changes between two snapshots, one entry per changed level.
    pub fn changes(
        &self,
        before: &ProgressState,
        after: &ProgressState,
        at: DateTime<Utc>,
    ) -> Vec<StatusChange<LevelStatus>> {
        self.catalog
            .levels()
            .iter()
            .filter_map(|l| {
                let (from, to) = (before.status(&l.id), after.status(&l.id));
                (from != to).then(|| {
                    debug!(level = %l.id, from = from.name(), to = to.name(), "level status changed");
                    StatusChange {
                        subject: l.id.clone(),
                        from,
                        to,
                        timestamp: at,
                    }
                })
            })
            .collect()
    }
}
