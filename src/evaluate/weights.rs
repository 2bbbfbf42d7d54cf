use crate::board::WindowCounts;

use super::ConfigError;

/// Per-window and per-cell weights of the static evaluation.
///
/// The values are a tuning choice. `validate` only enforces the ordering the
/// search relies on: a line outweighs an open three, which outweighs an open
/// two, and blocking an opponent three weighs less than completing a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeuristicWeights {
    /// Bonus per own token in the center column.
    pub center: i16,
    pub four: i16,
    pub three: i16,
    pub two: i16,
    /// Penalty for an opponent window with three tokens and one gap.
    pub opponent_three: i16,
    /// Penalty for an opponent window with two tokens and two gaps.
    pub opponent_two: i16,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            center: 6,
            four: 100,
            three: 5,
            two: 2,
            opponent_three: 4,
            opponent_two: 0,
        }
    }
}

impl HeuristicWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.four > self.three && self.three > self.two && self.two > 0) {
            return Err(ConfigError::InvalidWeights {
                reason: "expected four > three > two > 0",
            });
        }
        if !(self.opponent_three > 0 && self.opponent_three < self.four) {
            return Err(ConfigError::InvalidWeights {
                reason: "expected 0 < opponent_three < four",
            });
        }
        if self.center < 0 || self.opponent_two < 0 {
            return Err(ConfigError::InvalidWeights {
                reason: "center and opponent_two must not be negative",
            });
        }
        Ok(())
    }

    /// Contribution of a single window to the score.
    #[inline]
    pub fn score_window(&self, counts: WindowCounts) -> i16 {
        if counts.is_dead() {
            return 0;
        }
        match (counts.own, counts.opponent, counts.empty) {
            (4, _, _) => self.four,
            (3, _, 1) => self.three,
            (2, _, 2) => self.two,
            (_, 3, 1) => -self.opponent_three,
            (_, 2, 2) => -self.opponent_two,
            _ => 0,
        }
    }
}
