//! Threat-aware candidate selection for Connect Four.

use crate::alpha_beta_searcher::{center_out, MoveOrderer};
use crate::board::{Board, ColumnList, Token};

/// Open columns partitioned by what dropping into them does.
///
/// Every open column lands in exactly one tier; within a tier columns keep
/// center-out order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveTiers {
    /// The mover completes a line.
    pub win: ColumnList,
    /// The opponent would complete a line in the same cell.
    pub block: ColumnList,
    /// The cell above the landing cell gives the opponent no line.
    pub safe: ColumnList,
    /// Dropping here lets the opponent win on top.
    pub unsafe_: ColumnList,
}

impl MoveTiers {
    /// Winning and blocking drops if there are any, otherwise safe drops,
    /// otherwise whatever is left. `cols` is the board width the tiers were
    /// classified on.
    pub fn candidates(&self, cols: usize) -> ColumnList {
        if !self.win.is_empty() || !self.block.is_empty() {
            let mut forcing: ColumnList =
                self.win.iter().chain(self.block.iter()).copied().collect();
            forcing.sort_by_key(|column| (column.distance_from_center(cols), column.index()));
            forcing
        } else if !self.safe.is_empty() {
            self.safe.clone()
        } else {
            self.unsafe_.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.win.len() + self.block.len() + self.safe.len() + self.unsafe_.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn classify_moves(board: &Board, to_move: Token) -> MoveTiers {
    let opponent = to_move.other();
    let mut tiers = MoveTiers::default();

    for column in center_out(board) {
        let row = match board.landing_row(column) {
            Some(row) => row,
            None => continue,
        };

        if board.completes_line_at(row, column.index(), to_move) {
            tiers.win.push(column);
        } else if board.completes_line_at(row, column.index(), opponent) {
            tiers.block.push(column);
        } else if row > 0 && board.completes_line_at(row - 1, column.index(), opponent) {
            tiers.unsafe_.push(column);
        } else {
            tiers.safe.push(column);
        }
    }

    tiers
}

/// Candidate columns restricted to the most urgent non-empty tier.
#[derive(Clone, Default, Debug)]
pub struct TieredMoveOrderer;

impl MoveOrderer for TieredMoveOrderer {
    #[inline]
    fn candidate_columns(&self, board: &Board, to_move: Token) -> ColumnList {
        classify_moves(board, to_move).candidates(board.cols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Column;
    use crate::connect_four_position;

    fn numbers(columns: &[Column]) -> Vec<usize> {
        columns.iter().map(|column| column.number()).collect()
    }

    #[test]
    fn test_empty_board_is_all_safe_center_out() {
        let tiers = classify_moves(&Board::default(), Token::X);
        assert!(tiers.win.is_empty());
        assert!(tiers.block.is_empty());
        assert!(tiers.unsafe_.is_empty());
        assert_eq!(numbers(&tiers.safe), vec![4, 3, 5, 2, 6, 1, 7]);
        assert_eq!(numbers(&tiers.candidates(7)), vec![4, 3, 5, 2, 6, 1, 7]);
    }

    #[test]
    fn test_even_width_prefers_left_of_pair() {
        let board = Board::new(6, 6).unwrap();
        let tiers = classify_moves(&board, Token::O);
        assert_eq!(numbers(&tiers.safe), vec![4, 3, 5, 2, 6, 1]);
    }

    #[test]
    fn test_win_and_block_come_first() {
        // X wins in column 5 on the bottom row, O threatens column 1 vertically.
        let board = connect_four_position! {
            .......
            .......
            .......
            O......
            O......
            OXXX.X.
        };
        let tiers = classify_moves(&board, Token::X);
        assert_eq!(numbers(&tiers.win), vec![5]);
        assert_eq!(numbers(&tiers.block), vec![1]);
        assert_eq!(numbers(&tiers.candidates(7)), vec![5, 1]);
    }

    #[test]
    fn test_column_under_opponent_threat_is_unsafe() {
        // O would complete the row above once column 4 is filled underneath.
        let board = connect_four_position! {
            .......
            .......
            .......
            .......
            OOO....
            XXO....
        };
        let tiers = classify_moves(&board, Token::X);
        assert!(tiers.win.is_empty());
        assert!(tiers.block.is_empty());
        assert_eq!(numbers(&tiers.unsafe_), vec![4]);
        assert!(!tiers.candidates(7).contains(&Column::from_index(3)));
    }

    #[test]
    fn test_only_unsafe_moves_left() {
        let board = connect_four_position! {
            .......
            .......
            .......
            .......
            OOO....
            XXO....
        };
        let mut tiers = classify_moves(&board, Token::X);
        tiers.win.clear();
        tiers.block.clear();
        tiers.safe.clear();
        assert_eq!(numbers(&tiers.candidates(7)), vec![4]);
    }

    #[test]
    fn test_tiers_are_exhaustive_and_disjoint() {
        let boards = [
            Board::default(),
            connect_four_position! {
                .......
                .......
                ..O....
                ..XO...
                ..OXX..
                .XOXO..
            },
            connect_four_position! {
                .......
                .......
                .......
                O......
                O......
                OXXX.X.
            },
            connect_four_position! {
                X.X.X.X
                O.O.O.O
                X.X.X.X
                O.O.O.O
                X.X.X.X
                O.O.O.O
            },
        ];

        for board in boards.iter() {
            for token in Token::ALL.iter() {
                let tiers = classify_moves(board, *token);
                let mut all: Vec<usize> = [&tiers.win, &tiers.block, &tiers.safe, &tiers.unsafe_]
                    .iter()
                    .flat_map(|tier| numbers(tier))
                    .collect();
                assert_eq!(all.len(), tiers.len(), "overlapping tiers\n{}", board);
                all.sort_unstable();
                all.dedup();
                assert_eq!(all.len(), tiers.len(), "overlapping tiers\n{}", board);
                assert_eq!(all, numbers(&board.legal_columns()));
            }
        }
    }

    #[test]
    fn test_full_column_is_never_a_candidate() {
        let board = connect_four_position! {
            ...X...
            ...O...
            ...X...
            ...O...
            ...X...
            ...O...
        };
        let candidates = TieredMoveOrderer.candidate_columns(&board, Token::O);
        assert!(!candidates.contains(&Column::from_index(3)));
        assert_eq!(candidates.len(), 6);
    }
}
