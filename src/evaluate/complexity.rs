//! Maps how busy a position is to a search depth budget.
//!
//! Complexity grows with board fullness and with the number of open threes
//! (windows one drop away from a line) each side has. Tactical lines
//! multiply as complexity rises, so the schedule hands out more depth, never
//! less, as the score goes up.

use crate::board::{Board, Token};

use super::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComplexityWeights {
    /// Weight of the filled-cell ratio, which lies in `0.0..=1.0`.
    pub fullness: f32,
    pub ai_threats: f32,
    pub opponent_threats: f32,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self {
            fullness: 10.0,
            ai_threats: 2.0,
            opponent_threats: 3.0,
        }
    }
}

impl ComplexityWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [self.fullness, self.ai_threats, self.opponent_threats];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::InvalidComplexityWeights {
                reason: "weights must be finite and not negative",
            });
        }
        Ok(())
    }
}

/// Step function from complexity to depth: the first step whose threshold
/// exceeds the complexity wins, otherwise `max_depth` applies.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthSchedule {
    steps: Vec<(f32, u8)>,
    max_depth: u8,
}

impl Default for DepthSchedule {
    fn default() -> Self {
        Self {
            steps: vec![(4.0, 5), (8.0, 6), (14.0, 7)],
            max_depth: 8,
        }
    }
}

impl DepthSchedule {
    pub fn new(steps: Vec<(f32, u8)>, max_depth: u8) -> Result<Self, ConfigError> {
        let schedule = Self { steps, max_depth };
        schedule.validate()?;
        Ok(schedule)
    }

    /// A schedule that always answers `depth`.
    pub fn fixed(depth: u8) -> Self {
        Self {
            steps: Vec::new(),
            max_depth: depth,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.steps.iter().any(|&(_, depth)| depth == 0) {
            return Err(ConfigError::InvalidDepthSchedule {
                reason: "depths must be at least 1",
            });
        }
        if self.steps.iter().any(|(threshold, _)| !threshold.is_finite()) {
            return Err(ConfigError::InvalidDepthSchedule {
                reason: "thresholds must be finite",
            });
        }
        let increasing = self.steps.windows(2).all(|pair| {
            let (low, low_depth) = pair[0];
            let (high, high_depth) = pair[1];
            low < high && low_depth <= high_depth
        });
        let capped = self
            .steps
            .last()
            .map_or(true, |&(_, depth)| depth <= self.max_depth);
        if !increasing || !capped {
            return Err(ConfigError::InvalidDepthSchedule {
                reason: "thresholds must increase and depths must not decrease",
            });
        }
        Ok(())
    }

    pub fn depth_for(&self, complexity: f32) -> u8 {
        self.steps
            .iter()
            .find(|&&(threshold, _)| complexity < threshold)
            .map_or(self.max_depth, |&(_, depth)| depth)
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComplexityEstimate {
    pub complexity: f32,
    pub ai_threats: usize,
    pub opponent_threats: usize,
    pub depth: u8,
}

#[derive(Clone, Debug, Default)]
pub struct ComplexityEstimator {
    weights: ComplexityWeights,
    schedule: DepthSchedule,
}

impl ComplexityEstimator {
    pub fn new(weights: ComplexityWeights, schedule: DepthSchedule) -> Self {
        Self { weights, schedule }
    }

    pub fn estimate(&self, board: &Board, ai: Token) -> ComplexityEstimate {
        let ai_threats = potential_wins(board, ai);
        let opponent_threats = potential_wins(board, ai.other());
        let fullness = board.token_count() as f32 / board.cell_count() as f32;

        let complexity = self.weights.fullness * fullness
            + self.weights.ai_threats * ai_threats as f32
            + self.weights.opponent_threats * opponent_threats as f32;

        ComplexityEstimate {
            complexity,
            ai_threats,
            opponent_threats,
            depth: self.schedule.depth_for(complexity),
        }
    }

    pub fn schedule(&self) -> &DepthSchedule {
        &self.schedule
    }
}

/// Number of windows where `token` holds three cells and the fourth is
/// empty, regardless of whose turn it is or whether the gap is playable.
pub fn potential_wins(board: &Board, token: Token) -> usize {
    board
        .windows()
        .filter(|window| window.counts(token).is_potential_win())
        .count()
}
