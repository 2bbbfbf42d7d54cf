use thiserror::Error;

use crate::board::{Board, Token};

pub mod complexity;
mod weights;

pub use complexity::{ComplexityEstimate, ComplexityEstimator, ComplexityWeights, DepthSchedule};
pub use weights::HeuristicWeights;

// The win score sits outside the range any heuristic sum is clamped to, so a
// forced win or loss always dominates positional considerations.
pub const WIN_SCORE: i16 = i16::MAX;
pub const LOSS_SCORE: i16 = -i16::MAX;
pub const DRAW_SCORE: i16 = 0;
const HEURISTIC_LIMIT: i32 = WIN_SCORE as i32 - 1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid heuristic weights: {reason}")]
    InvalidWeights { reason: &'static str },
    #[error("Invalid complexity weights: {reason}")]
    InvalidComplexityWeights { reason: &'static str },
    #[error("Invalid depth schedule: {reason}")]
    InvalidDepthSchedule { reason: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnding {
    Win(Token),
    Draw,
}

/// Returns the game ending state if the game has ended, otherwise returns None.
pub fn game_ending(board: &Board) -> Option<GameEnding> {
    for token in Token::ALL.iter() {
        if board.has_line(*token) {
            return Some(GameEnding::Win(*token));
        }
    }

    if board.is_full() {
        return Some(GameEnding::Draw);
    }

    None
}

/// Score of a finished game from `perspective`'s point of view, or `None`
/// while the game is still running.
#[inline]
pub fn terminal_score(board: &Board, perspective: Token) -> Option<i16> {
    match game_ending(board)? {
        GameEnding::Win(token) if token == perspective => Some(WIN_SCORE),
        GameEnding::Win(_) => Some(LOSS_SCORE),
        GameEnding::Draw => Some(DRAW_SCORE),
    }
}

/// Static evaluation of a running game from `perspective`'s point of view.
pub fn score(board: &Board, perspective: Token, weights: &HeuristicWeights) -> i16 {
    let center = board.center_column().index();
    let center_tokens = (0..board.rows())
        .filter(|&row| board.get(row, center) == Some(perspective))
        .count() as i32;

    let windows: i32 = board
        .windows()
        .map(|window| weights.score_window(window.counts(perspective)) as i32)
        .sum();

    let total = center_tokens * weights.center as i32 + windows;
    total.clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT) as i16
}
