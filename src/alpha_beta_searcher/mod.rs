//! Alpha-beta search with a shared transposition table.
//!
//! The search itself knows Connect Four boards and tokens, but leaves static
//! evaluation and candidate selection to the `Evaluator` and `MoveOrderer`
//! traits.

mod search;
mod traits;
pub mod transposition_table;

#[cfg(test)]
mod tests;

pub use search::{
    alpha_beta_search, SearchConfig, SearchContext, SearchError, SearchOutcome, SearchStats,
};
pub use traits::{center_out, CenterOutOrderer, Evaluator, MoveOrderer};
pub use transposition_table::{BoundType, TranspositionTable};
