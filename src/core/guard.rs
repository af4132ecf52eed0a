//! Guard predicates.
//!
//! Guards are pure boolean functions over some context. The achievement
//! engine stores one guard per achievement and checks it against each
//! gameplay event.

use std::fmt;

/// Pure predicate over a context value.
///
/// # Example
///
/// ```rust
/// use gitquest::core::Guard;
///
/// let at_least_three = Guard::new(|combo: &u32| *combo >= 3);
///
/// assert!(!at_least_three.check(&2));
/// assert!(at_least_three.check(&3));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard holds for this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LevelStatus, State};

    #[test]
    fn guard_allows_matching_states() {
        let guard = Guard::new(|s: &LevelStatus| matches!(s, LevelStatus::Unlocked));

        assert!(guard.check(&LevelStatus::Unlocked));
        assert!(!guard.check(&LevelStatus::Locked));
    }

    #[test]
    fn guard_checks_non_final_states() {
        let guard = Guard::new(|s: &LevelStatus| !s.is_final());

        assert!(guard.check(&LevelStatus::Locked));
        assert!(guard.check(&LevelStatus::Unlocked));
        assert!(!guard.check(&LevelStatus::Completed));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|n: &u32| n % 2 == 0);

        assert_eq!(guard.check(&4), guard.check(&4));
        assert_eq!(guard.check(&5), guard.check(&5));
    }

    #[test]
    fn guard_can_capture_configuration() {
        let threshold = 3;
        let guard = Guard::new(move |combo: &u32| *combo >= threshold);

        assert!(!guard.check(&0));
        assert!(guard.check(&3));
        assert!(guard.check(&7));
    }
}
