//! Direction-vector line scanning.
//!
//! Win detection and the heuristic both look at the board through runs of
//! `LINE_LENGTH` cells along the four direction families. Two views are
//! provided: every in-bounds window on the board (full scans), and run
//! lengths radiating out of a single cell (checking the last drop).

use super::{Board, Column, Token, LINE_LENGTH};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right.
    DiagonalUp,
    /// Top-left to bottom-right.
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// `(row_step, col_step)`; rows grow downward.
    pub const fn steps(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalUp => (-1, 1),
            Direction::DiagonalDown => (1, 1),
        }
    }
}

/// `LINE_LENGTH` consecutive cells along one direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Window([Option<Token>; LINE_LENGTH]);

impl Window {
    pub fn cells(&self) -> &[Option<Token>; LINE_LENGTH] {
        &self.0
    }

    pub fn counts(&self, own: Token) -> WindowCounts {
        let mut counts = WindowCounts::default();
        for cell in self.0.iter() {
            match cell {
                Some(token) if *token == own => counts.own += 1,
                Some(_) => counts.opponent += 1,
                None => counts.empty += 1,
            }
        }
        counts
    }

    pub fn is_line(&self, token: Token) -> bool {
        self.0.iter().all(|&cell| cell == Some(token))
    }
}

/// Composition of a window from one side's point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WindowCounts {
    pub own: u8,
    pub opponent: u8,
    pub empty: u8,
}

impl WindowCounts {
    /// A window holding both tokens can never become a line for either side.
    pub fn is_dead(&self) -> bool {
        self.own > 0 && self.opponent > 0
    }

    /// Three of `own` and one gap: a single drop away from a line.
    pub fn is_potential_win(&self) -> bool {
        self.own as usize == LINE_LENGTH - 1 && self.empty == 1
    }
}

impl Board {
    /// The window starting at `(row, col)` in `direction`, if it fits.
    pub fn window(&self, row: usize, col: usize, direction: Direction) -> Option<Window> {
        let (row_step, col_step) = direction.steps();
        let reach = LINE_LENGTH as isize - 1;
        let end_row = row as isize + row_step * reach;
        let end_col = col as isize + col_step * reach;
        if !self.in_bounds(end_row, end_col) {
            return None;
        }

        let mut cells = [None; LINE_LENGTH];
        for (i, cell) in cells.iter_mut().enumerate() {
            let r = (row as isize + row_step * i as isize) as usize;
            let c = (col as isize + col_step * i as isize) as usize;
            *cell = self.get(r, c);
        }
        Some(Window(cells))
    }

    /// Every in-bounds window on the board, across all four directions.
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        Direction::ALL.iter().flat_map(move |&direction| {
            (0..self.rows()).flat_map(move |row| {
                (0..self.cols()).filter_map(move |col| self.window(row, col, direction))
            })
        })
    }

    /// True iff `token` has four in a row anywhere on the board.
    pub fn has_line(&self, token: Token) -> bool {
        self.windows().any(|window| window.is_line(token))
    }

    /// Counts consecutive `token` cells starting one step past `(row, col)`,
    /// stopping at a mismatch, the board edge, or after `max_steps`.
    pub fn run_length(
        &self,
        token: Token,
        row: usize,
        col: usize,
        row_step: isize,
        col_step: isize,
        max_steps: usize,
    ) -> usize {
        let mut count = 0;
        let mut r = row as isize;
        let mut c = col as isize;

        while count < max_steps {
            r += row_step;
            c += col_step;
            if !self.in_bounds(r, c) || self.get(r as usize, c as usize) != Some(token) {
                break;
            }
            count += 1;
        }
        count
    }

    /// Whether `token` on `(row, col)` would sit in a line of four, judging
    /// only by the neighbouring cells. The cell itself is not read.
    pub fn completes_line_at(&self, row: usize, col: usize, token: Token) -> bool {
        let reach = LINE_LENGTH - 1;
        Direction::ALL.iter().any(|direction| {
            let (row_step, col_step) = direction.steps();
            let forward = self.run_length(token, row, col, row_step, col_step, reach);
            let backward = self.run_length(token, row, col, -row_step, -col_step, reach);
            forward + backward >= reach
        })
    }

    /// Whether dropping `token` into `column` wins on the spot.
    pub fn completes_line(&self, column: Column, token: Token) -> bool {
        match self.landing_row(column) {
            Some(row) => self.completes_line_at(row, column.index(), token),
            None => false,
        }
    }

    #[inline]
    fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows() && (col as usize) < self.cols()
    }
}
