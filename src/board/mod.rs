pub mod column;
pub mod error;
pub mod key;
pub mod lines;
pub mod notation;
pub mod token;

mod display;


pub use column::{Column, ColumnList};
pub use error::BoardError;
pub use key::{CanonicalKey, Orientation, PositionKey};
pub use lines::{Direction, Window, WindowCounts};
pub use notation::BoardParseError;
pub use token::Token;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;
pub const MAX_DIMENSION: usize = 16;
/// Number of tokens in a row needed to win.
pub const LINE_LENGTH: usize = 4;

/// A gravity board: `rows x cols` cells stored row-major with row 0 at the
/// top, plus a fill counter per column. Counters always equal the number of
/// tokens in the column, and those tokens are stacked contiguously from the
/// bottom row.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Token>>,
    heights: Vec<usize>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cells: vec![None; DEFAULT_ROWS * DEFAULT_COLS],
            heights: vec![0; DEFAULT_COLS],
        }
    }
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if !(1..=MAX_DIMENSION).contains(&rows) || !(1..=MAX_DIMENSION).contains(&cols) {
            return Err(BoardError::InvalidDimensions {
                rows,
                cols,
                max: MAX_DIMENSION,
            });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            heights: vec![0; cols],
        })
    }

    /// Builds a board from row-major cells (row 0 on top). Fill counters are
    /// derived from the grid, which must respect gravity.
    pub fn from_cells(
        rows: usize,
        cols: usize,
        cells: Vec<Option<Token>>,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, cols)?;
        if cells.len() != rows * cols {
            return Err(BoardError::CellCountMismatch {
                expected: rows * cols,
                actual: cells.len(),
            });
        }

        for col in 0..cols {
            let mut height = 0;
            for row in (0..rows).rev() {
                match cells[row * cols + col] {
                    Some(_) if height == rows - 1 - row => height += 1,
                    Some(_) => {
                        return Err(BoardError::FloatingToken {
                            row: row + 1,
                            column: col + 1,
                        })
                    }
                    None => {}
                }
            }
            board.heights[col] = height;
        }
        board.cells = cells;

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Token> {
        self.cells[row * self.cols + col]
    }

    /// Validates a 1-indexed column number against this board.
    pub fn column(&self, number: usize) -> Result<Column, BoardError> {
        if number == 0 || number > self.cols {
            return Err(BoardError::InvalidColumn {
                column: number,
                cols: self.cols,
            });
        }
        Ok(Column::from_index(number - 1))
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> {
        (0..self.cols).map(Column::from_index)
    }

    pub fn center_column(&self) -> Column {
        Column::from_index(self.cols / 2)
    }

    /// Tokens in `column`; 0 for a column outside the board.
    #[inline]
    pub fn column_fill_count(&self, column: Column) -> usize {
        self.heights.get(column.index()).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_column_open(&self, column: Column) -> bool {
        column.index() < self.cols && self.heights[column.index()] < self.rows
    }

    /// Open columns in left-to-right order.
    pub fn legal_columns(&self) -> ColumnList {
        self.columns()
            .filter(|&column| self.is_column_open(column))
            .collect()
    }

    /// Row a token dropped into `column` would land on, if the column is open.
    #[inline]
    pub fn landing_row(&self, column: Column) -> Option<usize> {
        if self.is_column_open(column) {
            Some(self.rows - 1 - self.heights[column.index()])
        } else {
            None
        }
    }

    /// Drops `token` into `column` and returns the row it landed on.
    pub fn apply_move(&mut self, column: Column, token: Token) -> Result<usize, BoardError> {
        if column.index() >= self.cols {
            return Err(BoardError::InvalidColumn {
                column: column.number(),
                cols: self.cols,
            });
        }
        let row = self.landing_row(column).ok_or(BoardError::ColumnFull {
            column: column.number(),
        })?;

        self.cells[row * self.cols + column.index()] = Some(token);
        self.heights[column.index()] += 1;
        Ok(row)
    }

    /// Removes the topmost token of `column`, exactly reversing `apply_move`.
    pub fn undo_move(&mut self, column: Column) -> Result<Token, BoardError> {
        if column.index() >= self.cols {
            return Err(BoardError::InvalidColumn {
                column: column.number(),
                cols: self.cols,
            });
        }
        let height = self.heights[column.index()];
        if height == 0 {
            return Err(BoardError::ColumnEmpty {
                column: column.number(),
            });
        }

        let row = self.rows - height;
        let index = row * self.cols + column.index();
        let token = self.cells[index]
            .take()
            .ok_or(BoardError::ColumnEmpty {
                column: column.number(),
            })?;
        self.heights[column.index()] -= 1;
        Ok(token)
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&height| height == self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.heights.iter().all(|&height| height == 0)
    }

    pub fn token_count(&self) -> usize {
        self.heights.iter().sum()
    }

    pub fn count(&self, token: Token) -> usize {
        self.cells.iter().filter(|&&cell| cell == Some(token)).count()
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whose turn it is on a board where `first` moved first and turns
    /// alternated.
    pub fn side_to_move(&self, first: Token) -> Token {
        if self.token_count() % 2 == 0 {
            first
        } else {
            first.other()
        }
    }

    /// The board reflected left-right.
    pub fn mirrored(&self) -> Board {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for col in (0..self.cols).rev() {
                cells.push(self.get(row, col));
            }
        }
        let mut heights = self.heights.clone();
        heights.reverse();

        Board {
            rows: self.rows,
            cols: self.cols,
            cells,
            heights,
        }
    }
}
