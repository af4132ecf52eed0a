//! Tunable game configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Storage namespace must not be empty")]
    EmptyNamespace,

    #[error("Challenge bounds are invalid: min {min}, max {max} (need 1 <= min <= max)")]
    ChallengeBounds { min: usize, max: usize },

    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Game configuration. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Prefix of every persisted record key.
    pub storage_namespace: String,
    /// Fewest questions drawn for a challenge session.
    pub challenge_min_questions: usize,
    /// Most questions drawn for a challenge session.
    pub challenge_max_questions: usize,
    /// Session size needed for the full-clear achievement.
    pub full_clear_min_questions: usize,
    /// Consecutive correct answers needed for the combo achievement.
    pub combo_threshold: u32,
    /// Elapsed-time ticker period in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_namespace: "gitGame".to_string(),
            challenge_min_questions: 1,
            challenge_max_questions: 3,
            full_clear_min_questions: 3,
            combo_threshold: 3,
            tick_interval_ms: 1000,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if self.challenge_min_questions == 0
            || self.challenge_min_questions > self.challenge_max_questions
        {
            return Err(ConfigError::ChallengeBounds {
                min: self.challenge_min_questions,
                max: self.challenge_max_questions,
            });
        }
        if self.full_clear_min_questions == 0 {
            return Err(ConfigError::Zero("fullClearMinQuestions"));
        }
        if self.combo_threshold == 0 {
            return Err(ConfigError::Zero("comboThreshold"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Zero("tickIntervalMs"));
        }
        Ok(())
    }

    /// Storage key of a record, e.g. `gitGame:progress`.
    pub fn key(&self, record: &str) -> String {
        format!("{}:{}", self.storage_namespace, record)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
