//! Curriculum data model: levels and their questions.
//!
//! A [`LevelCatalog`] is a validated, order-sorted list of [`Level`]s. It is
//! the read-only input of the progression engine and the challenge pool.
//!
//! # Example
//!
//! ```rust
//! use gitquest::catalog::{LevelBuilder, LevelCatalog};
//!
//! let catalog = LevelCatalog::new(vec![
//!     LevelBuilder::new("basics").title("Basics").order(1).build().unwrap(),
//!     LevelBuilder::new("staging")
//!         .title("Staging")
//!         .order(2)
//!         .prerequisite("basics")
//!         .build()
//!         .unwrap(),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.first().map(|l| l.id.as_str()), Some("basics"));
//! assert_eq!(catalog.next_after("basics").map(|l| l.id.as_str()), Some("staging"));
//! ```

pub mod builder;
pub mod builtin;
pub mod error;
pub mod validation;

pub use builder::LevelBuilder;
pub use builtin::builtin;
pub use error::{BuildError, CatalogError, CatalogViolation};
pub use validation::validate;

use crate::repo::GitRepoState;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;

/// A button offered by a button-flow question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub id: String,
    pub label: String,
    /// Human description of what the button does.
    #[serde(default)]
    pub action: String,
    /// Pseudo-command fed to the repository simulator when pressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl ButtonSpec {
    pub fn new(id: &str, label: &str, action: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            action: action.to_string(),
            command: None,
        }
    }

    /// Attach the simulator command this button runs.
    pub fn runs(mut self, command: &str) -> Self {
        self.command = Some(command.to_string());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonFlowQuestion {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub expected_sequence: Vec<String>,
    pub buttons: Vec<ButtonSpec>,
}

impl ButtonFlowQuestion {
    pub fn button(&self, id: &str) -> Option<&ButtonSpec> {
        self.buttons.iter().find(|b| b.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleChoiceQuestion {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingQuestion {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<String>,
    /// Indices into `steps` in the correct order.
    pub correct_order: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputCommandQuestion {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub prompt: String,
    /// Accepted spellings, compared after whitespace normalization.
    pub correct_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A question, tagged by `type` in its serialized form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "button-flow")]
    ButtonFlow(ButtonFlowQuestion),
    #[serde(rename = "single-choice")]
    SingleChoice(SingleChoiceQuestion),
    #[serde(rename = "ordering")]
    Ordering(OrderingQuestion),
    #[serde(rename = "input")]
    InputCommand(InputCommandQuestion),
}

impl Question {
    pub fn id(&self) -> &str {
        match self {
            Self::ButtonFlow(q) => &q.id,
            Self::SingleChoice(q) => &q.id,
            Self::Ordering(q) => &q.id,
            Self::InputCommand(q) => &q.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::ButtonFlow(q) => &q.title,
            Self::SingleChoice(q) => &q.title,
            Self::Ordering(q) => &q.title,
            Self::InputCommand(q) => &q.title,
        }
    }

    /// Serialized tag of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ButtonFlow(_) => "button-flow",
            Self::SingleChoice(_) => "single-choice",
            Self::Ordering(_) => "ordering",
            Self::InputCommand(_) => "input",
        }
    }
}

/// A unit of curriculum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Default sequencing key; smaller comes first.
    pub order: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Repository snapshot button-flow questions start from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_repo: Option<GitRepoState>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Level {
    /// Fresh repository snapshot for a new visit to this level.
    pub fn seed_repo(&self) -> GitRepoState {
        self.initial_repo.clone().unwrap_or_default()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Whether every prerequisite is in `completed`.
    ///
    /// A level without prerequisites is always eligible.
    pub fn prerequisites_met<'a, I>(&self, completed: I) -> bool
    where
        I: IntoIterator<Item = &'a String> + Clone,
    {
        self.prerequisites
            .iter()
            .all(|p| completed.clone().into_iter().any(|c| c == p))
    }
}

/// Validated levels sorted by `(order, declaration position)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Validate and sort `levels`.
    ///
    /// Every violation is reported, not just the first one.
    pub fn new(mut levels: Vec<Level>) -> Result<Self, CatalogError> {
        match validate(&levels) {
            Validation::Success(_) => {}
            Validation::Failure(errors) => {
                return Err(CatalogError::Invalid(errors.iter().cloned().collect()));
            }
        }
        // Stable: equal orders keep declaration position.
        levels.sort_by_key(|l| l.order);
        Ok(Self { levels })
    }

    /// Load a catalog from the JSON array form used by level data files.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The level with minimal `order`.
    pub fn first(&self) -> Option<&Level> {
        self.levels.first()
    }

    /// The first level whose `order` is strictly greater than that of `id`.
    pub fn next_after(&self, id: &str) -> Option<&Level> {
        let current = self.get(id)?;
        self.levels.iter().find(|l| l.order > current.order)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|l| l.id.as_str())
    }

    /// Every question of every level, in level order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.levels.iter().flat_map(|l| l.questions.iter())
    }
}
