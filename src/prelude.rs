//! Common types re-exported for convenience.

pub use crate::board::{Board, Column, Token};
pub use crate::evaluate::GameEnding;
pub use crate::game::engine::{Engine, EngineConfig, EngineError};
