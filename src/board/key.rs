//! Canonical position keys for the transposition table.
//!
//! A board and its left-right reflection are the same position for search
//! purposes, so both encode to one key: the lexicographically smaller of the
//! two row-major byte encodings. Vertical reflections are not equivalent
//! under gravity and are never folded together.

use smallvec::SmallVec;
use std::fmt;

use super::{Board, Column, Token};

pub(crate) const EMPTY_BYTE: u8 = b'.';

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(SmallVec<[u8; 64]>);

impl CanonicalKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalKey({})", String::from_utf8_lossy(&self.0))
    }
}

/// Which encoding of the board was chosen as canonical.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    Identity,
    Mirrored,
}

impl Orientation {
    /// Maps a column between the board's own orientation and the canonical
    /// one. Reflection is an involution, so the same call works both ways.
    pub fn apply(self, column: Column, cols: usize) -> Column {
        match self {
            Orientation::Identity => column,
            Orientation::Mirrored => column.mirrored(cols),
        }
    }
}

/// Transposition table key: canonical grid plus the side to move.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PositionKey {
    grid: CanonicalKey,
    to_move: Token,
}

impl PositionKey {
    /// On even widths the center column has no mirror image, so the static
    /// evaluation is not reflection symmetric and reflections keep their
    /// own entries.
    pub fn new(board: &Board, to_move: Token) -> (Self, Orientation) {
        let (grid, orientation) = if board.cols() % 2 == 1 {
            board.oriented_key()
        } else {
            (board.identity_key(), Orientation::Identity)
        };
        (Self { grid, to_move }, orientation)
    }

    pub fn grid(&self) -> &CanonicalKey {
        &self.grid
    }

    pub fn to_move(&self) -> Token {
        self.to_move
    }
}

fn encode(cell: Option<Token>) -> u8 {
    cell.map_or(EMPTY_BYTE, Token::to_byte)
}

impl Board {
    pub fn canonical_key(&self) -> CanonicalKey {
        self.oriented_key().0
    }

    /// Row-major encoding without folding reflections.
    pub fn identity_key(&self) -> CanonicalKey {
        let mut bytes = SmallVec::with_capacity(self.cell_count());
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                bytes.push(encode(self.get(row, col)));
            }
        }
        CanonicalKey(bytes)
    }

    /// The canonical key together with the orientation it was taken from.
    pub fn oriented_key(&self) -> (CanonicalKey, Orientation) {
        let cols = self.cols();
        let mut original = SmallVec::with_capacity(self.cell_count());
        let mut mirrored = SmallVec::with_capacity(self.cell_count());
        for row in 0..self.rows() {
            for col in 0..cols {
                original.push(encode(self.get(row, col)));
                mirrored.push(encode(self.get(row, cols - 1 - col)));
            }
        }

        if mirrored < original {
            (CanonicalKey(mirrored), Orientation::Mirrored)
        } else {
            (CanonicalKey(original), Orientation::Identity)
        }
    }
}
