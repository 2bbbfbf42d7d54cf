use rand::seq::SliceRandom;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// A player's token. A cell on the board holds either a token or nothing.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    X,
    O,
}

impl Token {
    pub const ALL: [Token; 2] = [Token::X, Token::O];

    pub fn other(&self) -> Self {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
        }
    }

    pub fn random() -> Self {
        *Self::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Token::X)
    }

    /// Single-byte encoding used by board notation and canonical keys.
    pub fn to_byte(self) -> u8 {
        match self {
            Token::X => b'X',
            Token::O => b'O',
        }
    }
}

impl From<Token> for char {
    fn from(token: Token) -> Self {
        token.to_byte() as char
    }
}

impl TryFrom<char> for Token {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'X' | 'x' => Ok(Token::X),
            'O' | 'o' => Ok(Token::O),
            _ => Err(value),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for Token {
    type Err = ParseError;
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "x" | "X" => Ok(Token::X),
            "o" | "O" => Ok(Token::O),
            "random" => Ok(Token::random()),
            _ => Err("invalid token; options are: X, O, random"),
        }
    }
}
