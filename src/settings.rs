//! Player settings record.

use serde::{Deserialize, Serialize};

/// Visual theme; only its identity matters to the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Modern,
    Pixel,
    Cartoon,
    Minimal,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Modern, Theme::Pixel, Theme::Cartoon, Theme::Minimal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Pixel => "pixel",
            Self::Cartoon => "cartoon",
            Self::Minimal => "minimal",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningMode {
    #[default]
    Basic,
    Intermediate,
    Expert,
}

/// Persisted settings record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub learning_mode: LearningMode,
    pub has_seen_intro: bool,
}

impl Settings {
    pub fn with_theme(&self, theme: Theme) -> Self {
        Self {
            theme,
            ..self.clone()
        }
    }

    pub fn with_learning_mode(&self, learning_mode: LearningMode) -> Self {
        Self {
            learning_mode,
            ..self.clone()
        }
    }

    pub fn with_intro_seen(&self, has_seen_intro: bool) -> Self {
        Self {
            has_seen_intro,
            ..self.clone()
        }
    }
}
