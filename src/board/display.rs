use super::Board;
use std::fmt;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            write!(f, "|")?;
            for col in 0..self.cols() {
                let cell = self.get(row, col).map_or(' ', char::from);
                write!(f, " {} |", cell)?;
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for column in self.columns() {
            write!(f, "{:^3} ", column.number())?;
        }
        writeln!(f)
    }
}

/// Builds a standard 6x7 board from a picture of it, top row first, with `.`
/// for empty cells. Test helper; panics on malformed input.
#[macro_export]
macro_rules! connect_four_position {
    ($($cell:tt)*) => {{
        // Convert all input tokens to a string and filter out whitespace characters.
        let notation: String = stringify!($($cell)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        let rows = $crate::board::DEFAULT_ROWS;
        let cols = $crate::board::DEFAULT_COLS;
        assert_eq!(
            notation.len(),
            rows * cols,
            "Invalid number of cells. Expected {}, got {}",
            rows * cols,
            notation.len()
        );
        let cells = notation
            .chars()
            .map(|c| match c {
                '.' => None,
                'X' => Some($crate::board::Token::X),
                'O' => Some($crate::board::Token::O),
                _ => panic!("Invalid character in connect four position: {}", c),
            })
            .collect();
        $crate::board::Board::from_cells(rows, cols, cells).unwrap()
    }};
}
