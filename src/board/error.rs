use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Column {column} is not on the board, expected a column between 1 and {cols}")]
    InvalidColumn { column: usize, cols: usize },
    #[error("Cannot drop a token into column {column}, it is already full")]
    ColumnFull { column: usize },
    #[error("Cannot undo a move in column {column}, it is empty")]
    ColumnEmpty { column: usize },
    #[error("Invalid board dimensions {rows}x{cols}, each side must be between 1 and {max}")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },
    #[error("Expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("Token at row {row} (counted from the top), column {column} is floating above an empty cell")]
    FloatingToken { row: usize, column: usize },
}
