//! Text notation for boards: rows from top to bottom separated by `/`, one
//! character per cell (`.` empty, `X`, `O`). The standard empty board is
//! `......./......./......./......./......./.......`.

use std::convert::TryFrom;
use std::str::FromStr;

use thiserror::Error;

use super::key::EMPTY_BYTE;
use super::{Board, BoardError, Token};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("Board notation is empty")]
    Empty,
    #[error("Invalid cell character: {invalid_character:?}")]
    InvalidCellCharacter { invalid_character: char },
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid board: {board_error}")]
    InvalidBoard { board_error: BoardError },
}

pub const EMPTY_STANDARD_BOARD: &str = "......./......./......./......./......./.......";

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = notation
            .split(|c| c == '/' || c == '\n')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let width = rows.first().ok_or(BoardParseError::Empty)?.chars().count();

        let mut cells = Vec::with_capacity(rows.len() * width);
        for (row, text) in rows.iter().enumerate() {
            let actual = text.chars().count();
            if actual != width {
                return Err(BoardParseError::RaggedRow {
                    row: row + 1,
                    expected: width,
                    actual,
                });
            }
            for c in text.chars() {
                cells.push(parse_cell(c)?);
            }
        }

        Board::from_cells(rows.len(), width, cells)
            .map_err(|board_error| BoardParseError::InvalidBoard { board_error })
    }
}

fn parse_cell(c: char) -> Result<Option<Token>, BoardParseError> {
    if c == EMPTY_BYTE as char {
        return Ok(None);
    }
    Token::try_from(c)
        .map(Some)
        .map_err(|invalid_character| BoardParseError::InvalidCellCharacter { invalid_character })
}

impl Board {
    pub fn to_notation(&self) -> String {
        let rows: Vec<String> = (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| self.get(row, col).map_or(EMPTY_BYTE as char, char::from))
                    .collect()
            })
            .collect();
        rows.join("/")
    }
}
