//! Click-by-click attempt tracking for sequence questions.

use super::{classify_prefix, Correctness};

/// Accumulates clicks and classifies the sequence after each one.
///
/// Once the attempt reaches a terminal outcome further clicks are ignored
/// until [`SequenceAttempt::reset`] is called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceAttempt<T> {
    clicked: Vec<T>,
    status: Correctness,
    ignore_repeats: bool,
}

/// Attempt at an ordering question; re-clicking a chosen step is a no-op.
pub type OrderingAttempt = SequenceAttempt<usize>;

/// Attempt at a button-flow question; every press counts.
pub type ButtonFlowAttempt = SequenceAttempt<String>;

impl SequenceAttempt<usize> {
    pub fn ordering() -> Self {
        Self::new(true)
    }
}

impl SequenceAttempt<String> {
    pub fn button_flow() -> Self {
        Self::new(false)
    }
}

impl<T: PartialEq + Clone> SequenceAttempt<T> {
    fn new(ignore_repeats: bool) -> Self {
        Self {
            clicked: Vec::new(),
            status: Correctness::InProgress,
            ignore_repeats,
        }
    }

    /// Register one click and return the updated classification.
    pub fn click(&mut self, item: T, expected: &[T]) -> Correctness {
        if self.status.is_terminal() {
            return self.status;
        }
        if self.ignore_repeats && self.clicked.contains(&item) {
            return self.status;
        }
        self.clicked.push(item);
        self.status = classify_prefix(&self.clicked, expected);
        self.status
    }

    /// Clear every click so the question can be retried.
    pub fn reset(&mut self) {
        self.clicked.clear();
        self.status = Correctness::InProgress;
    }

    pub fn clicked(&self) -> &[T] {
        &self.clicked
    }

    pub fn status(&self) -> Correctness {
        self.status
    }

    /// 1-based position at which `item` was first clicked.
    pub fn position_of(&self, item: &T) -> Option<usize> {
        self.clicked.iter().position(|c| c == item).map(|p| p + 1)
    }
}
