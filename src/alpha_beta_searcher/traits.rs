//! Seams between the alpha-beta search and the game knowledge it consumes.

use crate::board::{Board, ColumnList, Token};

/// Evaluates a running (non-terminal) position.
pub trait Evaluator: Clone + Send + Sync {
    /// Static score of `board` from `perspective`'s point of view. Higher
    /// scores favor `perspective`.
    fn evaluate(&self, board: &Board, perspective: Token) -> i16;
}

/// Chooses which columns a node searches, and in which order.
pub trait MoveOrderer: Clone + Send + Sync {
    /// Candidate columns for `to_move`, best first. Every returned column
    /// must be open. An empty list is only allowed on a full board.
    fn candidate_columns(&self, board: &Board, to_move: Token) -> ColumnList;
}

/// Full-width orderer: every open column, center first then outward.
#[derive(Clone, Default, Debug)]
pub struct CenterOutOrderer;

impl MoveOrderer for CenterOutOrderer {
    #[inline]
    fn candidate_columns(&self, board: &Board, _to_move: Token) -> ColumnList {
        center_out(board)
    }
}

/// Open columns sorted by distance from the center; on even-width boards the
/// left column of an equidistant pair comes first.
pub fn center_out(board: &Board) -> ColumnList {
    let cols = board.cols();
    let mut columns = board.legal_columns();
    columns.sort_by_key(|column| (column.distance_from_center(cols), column.index()));
    columns
}
