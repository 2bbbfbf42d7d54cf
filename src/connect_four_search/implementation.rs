//! Connect Four trait implementations for the alpha-beta search.

use crate::alpha_beta_searcher::{
    alpha_beta_search, Evaluator, SearchContext, SearchError, SearchOutcome,
};
use crate::board::{Board, Token};
use crate::evaluate::{self, HeuristicWeights};
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::move_orderer::TieredMoveOrderer;

#[derive(Clone, Default, Debug)]
pub struct ConnectFourEvaluator {
    weights: HeuristicWeights,
}

impl ConnectFourEvaluator {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl Evaluator for ConnectFourEvaluator {
    #[inline]
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn evaluate(&self, board: &Board, perspective: Token) -> i16 {
        evaluate::score(board, perspective, &self.weights)
    }
}

/// Searches for the best column for the context's AI.
#[must_use = "search returns the best move found"]
pub fn search_best_move(
    context: &mut SearchContext,
    board: &Board,
    depth: u8,
    evaluator: &ConnectFourEvaluator,
) -> Result<SearchOutcome, SearchError> {
    alpha_beta_search(context, board, depth, evaluator, &TieredMoveOrderer)
}
