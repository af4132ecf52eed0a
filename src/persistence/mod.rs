//! Record persistence over an opaque key-value store.
//!
//! Records are flat JSON stored under `<namespace>:<record>` keys. A missing
//! key means first run. The store is a trait so the host can plug in
//! whatever medium it has; [`MemoryStore`], [`FileStore`] and
//! [`DetachedStore`] ship with the crate.
//!
//! # Example
//!
//! ```rust
//! use gitquest::persistence::{load_settings, save_settings, MemoryStore};
//! use gitquest::settings::{Settings, Theme};
//! use gitquest::GameConfig;
//!
//! let config = GameConfig::default();
//! let mut store = MemoryStore::new();
//! assert!(load_settings(&store, &config).unwrap().is_none());
//!
//! let settings = Settings::default().with_theme(Theme::Pixel);
//! save_settings(&mut store, &config, &settings).unwrap();
//! assert_eq!(load_settings(&store, &config).unwrap(), Some(settings));
//! ```

pub mod error;

pub use error::PersistenceError;

use crate::achievements::AchievementState;
use crate::config::GameConfig;
use crate::progress::ProgressState;
use crate::settings::Settings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PROGRESS_RECORD: &str = "progress";
pub const ACHIEVEMENTS_RECORD: &str = "achievements";
pub const SETTINGS_RECORD: &str = "settings";

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// In-process store backed by a `HashMap`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash never leaves a half-written record.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`; characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }

    fn io_error(key: &str) -> impl FnOnce(io::Error) -> PersistenceError + '_ {
        move |source| PersistenceError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key)(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.root).map_err(Self::io_error(key))?;
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(Self::io_error(key))?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(Self::io_error(key)(e));
        }
        debug!(key, path = %target.display(), "record written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key)(e)),
        }
    }
}

/// A store with no backing medium; every call fails with
/// [`PersistenceError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedStore;

impl KeyValueStore for DetachedStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Err(PersistenceError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable)
    }
}

/// Read and decode the record stored under `key`.
pub fn load_record<T, S>(store: &S, key: &str) -> Result<Option<T>, PersistenceError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PersistenceError::DeserializationFailed {
            key: key.to_string(),
            source,
        })
}

/// Encode and store `value` under `key`.
pub fn save_record<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), PersistenceError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| {
        PersistenceError::SerializationFailed {
            key: key.to_string(),
            source,
        }
    })?;
    store.set(key, &raw)
}

/// Load progress, repairing records where a completed level is not unlocked.
pub fn load_progress<S: KeyValueStore + ?Sized>(
    store: &S,
    config: &GameConfig,
) -> Result<Option<ProgressState>, PersistenceError> {
    let key = config.key(PROGRESS_RECORD);
    let Some(stored) = load_record::<ProgressState, S>(store, &key)? else {
        return Ok(None);
    };
    let (progress, repaired) = stored.repaired();
    if repaired {
        warn!(key = %key, "stored progress had completed levels that were not unlocked; repaired");
    }
    Ok(Some(progress))
}

pub fn save_progress<S: KeyValueStore + ?Sized>(
    store: &mut S,
    config: &GameConfig,
    progress: &ProgressState,
) -> Result<(), PersistenceError> {
    save_record(store, &config.key(PROGRESS_RECORD), progress)
}

pub fn load_achievements<S: KeyValueStore + ?Sized>(
    store: &S,
    config: &GameConfig,
) -> Result<Option<AchievementState>, PersistenceError> {
    load_record(store, &config.key(ACHIEVEMENTS_RECORD))
}

pub fn save_achievements<S: KeyValueStore + ?Sized>(
    store: &mut S,
    config: &GameConfig,
    achievements: &AchievementState,
) -> Result<(), PersistenceError> {
    save_record(store, &config.key(ACHIEVEMENTS_RECORD), achievements)
}

pub fn load_settings<S: KeyValueStore + ?Sized>(
    store: &S,
    config: &GameConfig,
) -> Result<Option<Settings>, PersistenceError> {
    load_record(store, &config.key(SETTINGS_RECORD))
}

pub fn save_settings<S: KeyValueStore + ?Sized>(
    store: &mut S,
    config: &GameConfig,
    settings: &Settings,
) -> Result<(), PersistenceError> {
    save_record(store, &config.key(SETTINGS_RECORD), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use chrono::Utc;
    use std::collections::BTreeSet;

    #[test]
    fn memory_store_get_set_remove() {
        let mut store = MemoryStore::new();

        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn progress_is_stored_under_namespaced_key() {
        let config = GameConfig::default();
        let mut store = MemoryStore::new();
        let progress = ProgressState {
            unlocked_level_ids: BTreeSet::from(["level-1".to_string()]),
            completed_level_ids: BTreeSet::new(),
            current_recommended_level_id: Some("level-1".to_string()),
        };

        save_progress(&mut store, &config, &progress).unwrap();

        let raw = store.get("gitGame:progress").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["currentRecommendedLevelId"], "level-1");
        assert_eq!(load_progress(&store, &config).unwrap(), Some(progress));
    }

    #[test]
    fn loading_progress_repairs_subset_violation() {
        let config = GameConfig::default();
        let mut store = MemoryStore::new();
        store
            .set(
                "gitGame:progress",
                r#"{"unlockedLevelIds":[],"completedLevelIds":["level-1"]}"#,
            )
            .unwrap();

        let progress = load_progress(&store, &config).unwrap().unwrap();

        assert!(progress.is_unlocked("level-1"));
    }

    #[test]
    fn corrupt_record_is_a_deserialization_error() {
        let config = GameConfig::default();
        let mut store = MemoryStore::new();
        store.set("gitGame:settings", "{oops").unwrap();

        let err = load_settings(&store, &config).unwrap_err();

        assert!(matches!(
            err,
            PersistenceError::DeserializationFailed { ref key, .. } if key == "gitGame:settings"
        ));
    }

    #[test]
    fn achievements_round_trip_through_store() {
        let config = GameConfig::default();
        let mut store = MemoryStore::new();
        let (state, _) = AchievementState::new().unlock(AchievementId::ThreeCombo, Utc::now());

        save_achievements(&mut store, &config, &state).unwrap();

        assert_eq!(load_achievements(&store, &config).unwrap(), Some(state));
    }

    #[test]
    fn detached_store_is_unavailable() {
        let mut store = DetachedStore;

        assert!(matches!(store.get("k"), Err(PersistenceError::Unavailable)));
        assert!(matches!(
            save_settings(&mut store, &GameConfig::default(), &Settings::default()),
            Err(PersistenceError::Unavailable)
        ));
    }

    #[test]
    fn file_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));

        assert_eq!(store.get("gitGame:progress").unwrap(), None);
        store.set("gitGame:progress", "{}").unwrap();

        let path = store.path_for("gitGame:progress");
        assert_eq!(path.file_name().unwrap(), "gitGame_progress.json");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!path.with_extension("json.tmp").exists());

        store.set("gitGame:progress", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("gitGame:progress").unwrap().as_deref(), Some(r#"{"a":1}"#));

        store.remove("gitGame:progress").unwrap();
        store.remove("gitGame:progress").unwrap();
        assert_eq!(store.get("gitGame:progress").unwrap(), None);
    }

    #[test]
    fn failed_rename_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let target = store.path_for("gitGame:progress");
        fs::create_dir_all(target.join("occupied")).unwrap();

        let err = store.set("gitGame:progress", "{}").unwrap_err();

        assert!(matches!(err, PersistenceError::Io { ref key, .. } if key == "gitGame:progress"));
        assert!(!target.with_extension("json.tmp").exists());
        assert!(target.is_dir());
    }
}
