//! Shared state machine building blocks.
//!
//! - Status enums via the `State` trait
//! - Guard predicates used by rule tables
//! - Immutable, timestamped status change logs
//!
//! Everything here is pure.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StatusChange, TransitionLog};
pub use state::{LevelStatus, State};
