//! Fluent builder for levels.

use crate::catalog::error::BuildError;
use crate::catalog::{Level, Question};
use crate::repo::GitRepoState;

/// Builder for constructing levels with a fluent API.
#[derive(Debug, Clone, Default)]
pub struct LevelBuilder {
    id: String,
    title: Option<String>,
    description: String,
    order: Option<i32>,
    prerequisites: Vec<String>,
    tags: Vec<String>,
    initial_repo: Option<GitRepoState>,
    questions: Vec<Question>,
}

impl LevelBuilder {
    /// Start a level with the given id (required, non-empty).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the title (required).
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the sequencing key (required).
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Require another level to be completed before this one unlocks.
    pub fn prerequisite(mut self, level_id: impl Into<String>) -> Self {
        self.prerequisites.push(level_id.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Repository snapshot the level's button flows start from.
    pub fn initial_repo(mut self, repo: GitRepoState) -> Self {
        self.initial_repo = Some(repo);
        self
    }

    /// Append a question; questions keep insertion order.
    pub fn question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Build the level.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Level, BuildError> {
        if self.id.trim().is_empty() {
            return Err(BuildError::MissingId);
        }
        let title = self.title.ok_or_else(|| BuildError::MissingTitle(self.id.clone()))?;
        let order = self.order.ok_or_else(|| BuildError::MissingOrder(self.id.clone()))?;

        Ok(Level {
            id: self.id,
            title,
            description: self.description,
            order,
            prerequisites: self.prerequisites,
            tags: self.tags,
            initial_repo: self.initial_repo,
            questions: self.questions,
        })
    }
}
