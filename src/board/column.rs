use smallvec::SmallVec;
use std::fmt;

use super::MAX_DIMENSION;

/// A column on the board, stored 0-indexed. Everything that faces a player
/// (display, CLI, `Engine::recommend_move`) uses the 1-indexed `number`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Column(u8);

/// Column lists never outgrow the widest supported board, so they stay inline.
pub type ColumnList = SmallVec<[Column; MAX_DIMENSION]>;

impl Column {
    /// Builds a column from a 0-based index. Bounds are checked by the board
    /// that consumes it, see `Board::column` for validated construction.
    pub const fn from_index(index: usize) -> Self {
        Column(index as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn number(self) -> usize {
        self.0 as usize + 1
    }

    /// The same column on a board reflected left-right.
    pub const fn mirrored(self, cols: usize) -> Self {
        Column((cols - 1 - self.0 as usize) as u8)
    }

    /// Distance from the board's center column, used for center-out ordering.
    pub fn distance_from_center(self, cols: usize) -> usize {
        let center = cols / 2;
        if self.index() > center {
            self.index() - center
        } else {
            center - self.index()
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_and_number() {
        let column = Column::from_index(3);
        assert_eq!(column.index(), 3);
        assert_eq!(column.number(), 4);
        assert_eq!(column.to_string(), "4");
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(Column::from_index(0).mirrored(7), Column::from_index(6));
        assert_eq!(Column::from_index(3).mirrored(7), Column::from_index(3));
        assert_eq!(Column::from_index(1).mirrored(6), Column::from_index(4));
    }

    #[test]
    fn test_distance_from_center() {
        assert_eq!(Column::from_index(3).distance_from_center(7), 0);
        assert_eq!(Column::from_index(0).distance_from_center(7), 3);
        assert_eq!(Column::from_index(6).distance_from_center(7), 3);
        assert_eq!(Column::from_index(2).distance_from_center(6), 1);
    }
}
