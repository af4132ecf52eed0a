//! Answer counters and combo.

use serde::{Deserialize, Serialize};

/// Correct and wrong counters plus the current streak of correct answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub correct: u32,
    pub wrong: u32,
    pub combo: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one answer. A wrong answer resets the combo to zero.
    pub fn record(&self, correct: bool) -> Self {
        if correct {
            Self {
                correct: self.correct + 1,
                combo: self.combo + 1,
                ..*self
            }
        } else {
            Self {
                wrong: self.wrong + 1,
                combo: 0,
                ..*self
            }
        }
    }

    pub fn answered(&self) -> u32 {
        self.correct + self.wrong
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answers_build_combo() {
        let score = [true, true, true]
            .iter()
            .fold(Scoreboard::new(), |s, &c| s.record(c));

        assert_eq!(score, Scoreboard { correct: 3, wrong: 0, combo: 3 });
    }

    #[test]
    fn wrong_answer_resets_combo_but_keeps_counts() {
        let score = Scoreboard::new().record(true).record(true).record(false);

        assert_eq!(score.combo, 0);
        assert_eq!(score.correct, 2);
        assert_eq!(score.wrong, 1);
        assert_eq!(score.answered(), 3);

        assert_eq!(score.record(true).combo, 1);
    }
}
