//! GitQuest: the progression and simulation core of an interactive Git tutorial.
//!
//! Everything that decides game state lives here as pure functions over
//! immutable snapshots; storage and timing sit at the edges.
//!
//! # Core Concepts
//!
//! - **Catalog**: validated levels and their questions
//! - **Evaluator**: decides whether an answer is right, click by click
//! - **Repository simulator**: a toy Git repository driven by pseudo-commands
//! - **Progression**: level unlocking from prerequisites and completions
//! - **Achievements**: monotonic unlocks earned by gameplay events
//! - **Session**: owns the records and persists them after each change
//!
//! # Example
//!
//! ```rust
//! use gitquest::catalog::builtin;
//! use gitquest::evaluator::{Correctness, Response};
//! use gitquest::persistence::MemoryStore;
//! use gitquest::{GameConfig, Session};
//!
//! let mut session = Session::open(builtin().unwrap(), GameConfig::default(), MemoryStore::new()).unwrap();
//!
//! let mut run = session.start_level("level-1").unwrap();
//! let verdict = run.submit("q1-3", &Response::Text("git   init".to_string()));
//! assert_eq!(verdict, Some(Correctness::Complete));
//!
//! session.record_answer(true);
//! session.complete_level("level-1");
//! assert_eq!(
//!     session.progress().current_recommended_level_id.as_deref(),
//!     Some("level-2")
//! );
//! ```

pub mod achievements;
pub mod catalog;
pub mod challenge;
pub mod config;
pub mod core;
pub mod evaluator;
pub mod persistence;
pub mod play;
pub mod progress;
pub mod repo;
pub mod scoring;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use catalog::{Level, LevelCatalog, Question};
pub use config::{ConfigError, GameConfig};
pub use core::{Guard, LevelStatus, State};
pub use evaluator::{evaluate, Correctness, Response};
pub use progress::{ProgressState, ProgressionEngine};
pub use repo::{apply_command, GitRepoState};
pub use session::Session;
