//! Errors raised while building and loading level catalogs.

use thiserror::Error;

/// Errors that can occur when building a level.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Level id not specified. Call LevelBuilder::new(id) with a non-empty id")]
    MissingId,

    #[error("Level '{0}' has no title. Call .title(text) before .build()")]
    MissingTitle(String),

    #[error("Level '{0}' has no order. Call .order(n) before .build()")]
    MissingOrder(String),
}

/// A single problem found while validating a catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogViolation {
    #[error("Level id '{0}' is used more than once")]
    DuplicateLevel(String),

    #[error("Level '{level}' contains question id '{question}' more than once")]
    DuplicateQuestion { level: String, question: String },

    #[error("Level '{level}' requires unknown level '{prerequisite}'")]
    UnknownPrerequisite { level: String, prerequisite: String },

    #[error("Level '{0}' lists itself as a prerequisite")]
    SelfPrerequisite(String),

    #[error("Question '{question}' answer index {index} is out of range ({options} options)")]
    AnswerOutOfRange {
        question: String,
        index: usize,
        options: usize,
    },

    #[error("Question '{question}' correct order must list distinct step indices below {steps}")]
    InvalidOrdering { question: String, steps: usize },

    #[error("Question '{question}' expects unknown button '{button}'")]
    UnknownButton { question: String, button: String },

    #[error("Question '{0}' has no non-empty accepted answer")]
    NoAcceptedAnswer(String),
}

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog failed validation with {} violation(s)", .0.len())]
    Invalid(Vec<CatalogViolation>),

    #[error(transparent)]
    Build(#[from] BuildError),
}
