use log::debug;
use thiserror::Error;

use crate::alpha_beta_searcher::{SearchConfig, SearchContext, SearchError, SearchStats};
use crate::board::{Board, BoardError, Column, Token};
use crate::connect_four_search::{search_best_move, ConnectFourEvaluator};
use crate::evaluate::{
    game_ending, ComplexityEstimate, ComplexityEstimator, ComplexityWeights, ConfigError,
    DepthSchedule, GameEnding, HeuristicWeights,
};

pub const DEFAULT_CACHE_CAPACITY: usize = 1 << 16;

/// Core engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Fixed search depth. `None` derives the depth from the position's
    /// complexity.
    pub search_depth: Option<u8>,
    pub parallel: bool,
    pub randomize_ties: bool,
    pub heuristic: HeuristicWeights,
    pub complexity: ComplexityWeights,
    pub depth_schedule: DepthSchedule,
    /// Initial capacity of the transposition table.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: None,
            parallel: true,
            randomize_ties: true,
            heuristic: HeuristicWeights::default(),
            complexity: ComplexityWeights::default(),
            depth_schedule: DepthSchedule::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heuristic.validate()?;
        self.complexity.validate()?;
        self.depth_schedule.validate()?;
        if self.search_depth == Some(0) {
            return Err(ConfigError::InvalidDepthSchedule {
                reason: "a fixed search depth must be at least 1",
            });
        }
        Ok(())
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            parallel: self.parallel,
            randomize_ties: self.randomize_ties,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("The AI and its opponent must play different tokens")]
    SameSides,
    #[error("The game is already over")]
    GameOver,
    #[error("Search error: {error}")]
    Search { error: SearchError },
    #[error("Board error: {error}")]
    Board { error: BoardError },
    #[error("Config error: {error}")]
    Config { error: ConfigError },
}

impl From<SearchError> for EngineError {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::GameOver => EngineError::GameOver,
            error => EngineError::Search { error },
        }
    }
}

/// Recommends columns for one side of a game.
///
/// The engine owns its transposition table. Cached scores are relative to the
/// AI's token, so the table is cleared whenever the sides change.
pub struct Engine {
    config: EngineConfig,
    ai: Token,
    opponent: Token,
    evaluator: ConnectFourEvaluator,
    estimator: ComplexityEstimator,
    search_context: SearchContext,
}

impl Default for Engine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|error| EngineError::Config { error })?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let ai = Token::O;
        Self {
            ai,
            opponent: ai.other(),
            evaluator: ConnectFourEvaluator::new(config.heuristic),
            estimator: ComplexityEstimator::new(config.complexity, config.depth_schedule.clone()),
            search_context: SearchContext::with_config(
                ai,
                config.search_config(),
                config.cache_capacity,
            ),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assigns tokens to the AI and its opponent.
    pub fn configure_sides(&mut self, ai: Token, opponent: Token) -> Result<(), EngineError> {
        if ai == opponent {
            return Err(EngineError::SameSides);
        }
        if ai != self.ai {
            debug!("AI now plays {}, clearing cache", ai);
        }
        self.ai = ai;
        self.opponent = opponent;
        self.search_context.set_ai(ai);
        Ok(())
    }

    /// `(ai, opponent)`
    pub fn sides(&self) -> (Token, Token) {
        (self.ai, self.opponent)
    }

    /// Recommends a 1-indexed column for the AI on `board`, searching
    /// `depth` plies. Blocks until the search is done; `board` is not
    /// modified.
    pub fn recommend_move(&mut self, board: &Board, depth: u8) -> Result<Column, EngineError> {
        self.recommend_move_with_score(board, depth)
            .map(|(column, _)| column)
    }

    /// Like `recommend_move`, also returning the score of the chosen column
    /// from the AI's point of view.
    pub fn recommend_move_with_score(
        &mut self,
        board: &Board,
        depth: u8,
    ) -> Result<(Column, i16), EngineError> {
        if let Some(GameEnding::Win(winner)) = game_ending(board) {
            debug!("refusing to search, {} already won", winner);
            return Err(EngineError::GameOver);
        }

        let outcome = search_best_move(&mut self.search_context, board, depth, &self.evaluator)?;

        if !board.is_column_open(outcome.column) {
            return Err(EngineError::Board {
                error: BoardError::ColumnFull {
                    column: outcome.column.number(),
                },
            });
        }

        Ok((outcome.column, outcome.score))
    }

    /// Recommends a column at the configured depth, or at the depth the
    /// complexity estimate suggests when no depth is configured.
    pub fn recommend_move_auto(&mut self, board: &Board) -> Result<Column, EngineError> {
        let depth = match self.config.search_depth {
            Some(depth) => depth,
            None => self.estimate_depth(board),
        };
        self.recommend_move(board, depth)
    }

    /// Depth budget the complexity schedule assigns to `board`.
    pub fn estimate_depth(&self, board: &Board) -> u8 {
        self.estimate_complexity(board).depth
    }

    pub fn estimate_complexity(&self, board: &Board) -> ComplexityEstimate {
        let estimate = self.estimator.estimate(board, self.ai);
        debug!(
            "complexity {:.2} ({} AI threats, {} opponent threats) -> depth {}",
            estimate.complexity, estimate.ai_threats, estimate.opponent_threats, estimate.depth
        );
        estimate
    }

    pub fn clear_cache(&mut self) {
        self.search_context.clear_cache();
    }

    pub fn search_stats(&self) -> SearchStats {
        self.search_context.stats()
    }

    /// A uniformly random open column.
    pub fn random_move(&self, board: &Board) -> Result<Column, EngineError> {
        let open = board.legal_columns();
        if open.is_empty() {
            return Err(EngineError::Search {
                error: SearchError::NoAvailableMoves,
            });
        }
        Ok(open[fastrand::usize(..open.len())])
    }
}
