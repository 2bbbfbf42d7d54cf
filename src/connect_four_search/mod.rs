//! Connect Four specific implementation of the alpha-beta search traits.

pub mod implementation;
mod move_orderer;


pub use implementation::{search_best_move, ConnectFourEvaluator};
pub use move_orderer::{classify_moves, MoveTiers, TieredMoveOrderer};
