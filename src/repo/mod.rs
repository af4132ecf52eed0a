//! Simplified Git repository simulator.
//!
//! A repository snapshot is a set of files plus an ordered list of commits.
//! [`apply_command`] interprets one pseudo-command and returns a new
//! snapshot; the input snapshot is never modified, so a caller can keep the
//! sequence of snapshots for replay.
//!
//! # Example
//!
//! ```rust
//! use gitquest::repo::{apply_command, FileStatus, GitRepoState};
//!
//! let repo = GitRepoState::empty();
//! let repo = apply_command(&repo, "modify file1");
//! let repo = apply_command(&repo, "git add .");
//! let repo = apply_command(&repo, "git commit -m 'Add new feature'");
//!
//! assert_eq!(repo.files[0].status, FileStatus::Committed);
//! assert_eq!(repo.head().map(|c| c.message.as_str()), Some("Add new feature"));
//! ```

mod command;
mod hash;

pub use command::{RepoCommand, DEFAULT_COMMIT_MESSAGE};
pub use hash::{commit_id, short_hash, SHORT_HASH_LEN};

use crate::core::State;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Status of a simulated file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Untracked,
    Modified,
    Staged,
    Committed,
}

impl State for FileStatus {
    fn name(&self) -> &str {
        match self {
            Self::Untracked => "untracked",
            Self::Modified => "modified",
            Self::Staged => "staged",
            Self::Committed => "committed",
        }
    }
}

impl FileStatus {
    /// Whether `git add` moves a file in this status to the staging area.
    pub fn is_stageable(&self) -> bool {
        matches!(self, Self::Untracked | Self::Modified)
    }

    /// Whether `modify` turns a file in this status into `modified`.
    pub fn is_modifiable(&self) -> bool {
        matches!(self, Self::Untracked | Self::Committed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitFile {
    pub id: String,
    pub name: String,
    pub status: FileStatus,
}

impl GitFile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: FileStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
        }
    }

    /// File created by `modify <id>` when no file with that id exists.
    ///
    /// `file1` is the conventional id of `README.md`; any other id becomes
    /// `<id>.txt`.
    pub fn from_id(id: &str) -> Self {
        let name = if id == "file1" {
            "README.md".to_string()
        } else {
            format!("{id}.txt")
        };
        Self::new(id, name, FileStatus::Modified)
    }

    fn with_status(&self, status: FileStatus) -> Self {
        if self.status != status {
            debug!(
                file = %self.id,
                from = self.status.name(),
                to = status.name(),
                "file status changed"
            );
        }
        Self {
            status,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    pub id: String,
    pub message: String,
    pub short_hash: String,
    pub is_head: bool,
}

/// Immutable repository snapshot.
///
/// Invariant: at most one commit has `is_head` set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRepoState {
    pub files: Vec<GitFile>,
    pub commits: Vec<CommitNode>,
}

impl GitRepoState {
    /// A repository with no files and no commits.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Two untracked files, the usual starting point for add/commit drills.
    pub fn example() -> Self {
        Self {
            files: vec![
                GitFile::new("file1", "README.md", FileStatus::Untracked),
                GitFile::new("file2", "src/App.tsx", FileStatus::Untracked),
            ],
            commits: Vec::new(),
        }
    }

    pub fn file(&self, id: &str) -> Option<&GitFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// The commit currently flagged as HEAD.
    pub fn head(&self) -> Option<&CommitNode> {
        self.commits.iter().find(|c| c.is_head)
    }

    /// Files shown in the working directory (untracked or modified).
    pub fn working_files(&self) -> impl Iterator<Item = &GitFile> {
        self.files.iter().filter(|f| f.status.is_stageable())
    }

    pub fn staged_files(&self) -> impl Iterator<Item = &GitFile> {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Staged)
    }

    pub fn committed_files(&self) -> impl Iterator<Item = &GitFile> {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Committed)
    }

    pub fn has_staged_files(&self) -> bool {
        self.staged_files().next().is_some()
    }

    /// Apply a parsed command, drawing commit hashes from `rng`.
    pub fn apply<R: Rng + ?Sized>(&self, command: &RepoCommand, rng: &mut R) -> Self {
        match command {
            RepoCommand::Init => Self::empty(),
            RepoCommand::Modify { file_id } => self.modify(file_id),
            RepoCommand::AddAll => self.stage_where(|_| true),
            RepoCommand::AddPath { path } => {
                self.stage_where(|f| f.id == *path || f.name == *path)
            }
            RepoCommand::Commit { message } => self.commit(message, rng),
            RepoCommand::Unrecognized => self.clone(),
        }
    }

    fn modify(&self, file_id: &str) -> Self {
        let mut next = self.clone();
        match self.files.iter().position(|f| f.id == file_id) {
            None => next.files.push(GitFile::from_id(file_id)),
            Some(index) if self.files[index].status.is_modifiable() => {
                next.files[index] = self.files[index].with_status(FileStatus::Modified);
            }
            Some(_) => {}
        }
        next
    }

    fn stage_where<F>(&self, selects: F) -> Self
    where
        F: Fn(&GitFile) -> bool,
    {
        let files = self
            .files
            .iter()
            .map(|f| {
                if selects(f) && f.status.is_stageable() {
                    f.with_status(FileStatus::Staged)
                } else {
                    f.clone()
                }
            })
            .collect();
        Self {
            files,
            commits: self.commits.clone(),
        }
    }

    fn commit<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Self {
        if !self.has_staged_files() {
            debug!("commit ignored: nothing staged");
            return self.clone();
        }

        let files = self
            .files
            .iter()
            .map(|f| {
                if f.status == FileStatus::Staged {
                    f.with_status(FileStatus::Committed)
                } else {
                    f.clone()
                }
            })
            .collect();

        let mut commits: Vec<CommitNode> = self
            .commits
            .iter()
            .map(|c| CommitNode {
                is_head: false,
                ..c.clone()
            })
            .collect();
        let node = CommitNode {
            id: commit_id(rng),
            message: message.to_string(),
            short_hash: short_hash(rng),
            is_head: true,
        };
        debug!(hash = %node.short_hash, message = %node.message, "commit created");
        commits.push(node);

        Self { files, commits }
    }
}

/// Apply a pseudo-command using the thread-local random source.
///
/// Total: unrecognized commands return an unchanged copy of `state`.
pub fn apply_command(state: &GitRepoState, command: &str) -> GitRepoState {
    apply_command_with(state, command, &mut rand::thread_rng())
}

/// Apply a pseudo-command with an injected random source.
pub fn apply_command_with<R: Rng + ?Sized>(
    state: &GitRepoState,
    command: &str,
    rng: &mut R,
) -> GitRepoState {
    let parsed = RepoCommand::parse(command);
    if parsed == RepoCommand::Unrecognized {
        debug!(command, "unrecognized command ignored");
    }
    state.apply(&parsed, rng)
}
