//! Alpha-beta search over Connect Four positions.
//!
//! # Core Algorithm
//!
//! Fail-soft alpha-beta minimax. Scores are always taken from the AI's point
//! of view: nodes where the AI drops a token maximize, nodes where the
//! opponent drops minimize. A completed line for the AI scores `WIN_SCORE`,
//! one for the opponent `LOSS_SCORE`, a full board without a line scores 0,
//! and positions at the depth horizon are scored by the `Evaluator`.
//!
//! # Node Order
//!
//! 1. Terminal check (line for either side, full board).
//! 2. Horizon: static evaluation at depth 0.
//! 3. Transposition table probe. Only hits with the same remaining depth and
//!    a bound compatible with the window short-circuit the node.
//! 4. Candidate columns from the `MoveOrderer`, with the cached best column
//!    moved to the front.
//! 5. Immediate win: if the mover can complete a line, the node's value is
//!    known without recursing.
//! 6. Recursion with apply/undo on the search's private board.
//! 7. Store the result tagged with its bound against the original window.
//!
//! # Root
//!
//! The root is always an AI node. Every column scoring the best value is
//! collected and one is picked at random, so the score returned never depends
//! on the pick. Root children are searched with windows that keep tied scores
//! exact: the full window in parallel mode, `(best - 1, MAX)` sequentially.
//!
//! # Parallel Search
//!
//! Root children can be searched on the rayon pool, each on its own clone of
//! the board. Workers share the transposition table.

use std::cmp::{max, min};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use log::debug;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::transposition_table::{BoundType, TranspositionTable, DEFAULT_TT_CAPACITY};
use super::{Evaluator, MoveOrderer};
use crate::board::{Board, Column, ColumnList, Orientation, PositionKey, Token};
use crate::evaluate::{game_ending, terminal_score, GameEnding, LOSS_SCORE, WIN_SCORE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("the game is already over")]
    GameOver,
}

/// Search configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Search root children on the rayon pool.
    pub parallel: bool,
    /// Pick uniformly among tied root columns. When off, the first tied
    /// column in candidate order is returned.
    pub randomize_ties: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            randomize_ties: true,
        }
    }
}

/// Result of a root search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub column: Column,
    pub score: i16,
    /// Every root column whose score tied `score`.
    pub tied: ColumnList,
}

/// Counters collected during search.
struct SearchCounters {
    position_count: AtomicUsize,
    tt_probes: AtomicUsize,
    tt_stores: AtomicUsize,
    tt_probe_misses: AtomicUsize,
    cutoffs: AtomicUsize,
    immediate_wins: AtomicUsize,
    last_score: Option<i16>,
    last_duration: Option<Duration>,
}

impl SearchCounters {
    fn new() -> Self {
        Self {
            position_count: AtomicUsize::new(0),
            tt_probes: AtomicUsize::new(0),
            tt_stores: AtomicUsize::new(0),
            tt_probe_misses: AtomicUsize::new(0),
            cutoffs: AtomicUsize::new(0),
            immediate_wins: AtomicUsize::new(0),
            last_score: None,
            last_duration: None,
        }
    }

    fn reset(&mut self) {
        self.last_score = None;
        self.last_duration = None;
        self.position_count.store(0, Ordering::SeqCst);
        self.tt_probes.store(0, Ordering::SeqCst);
        self.tt_stores.store(0, Ordering::SeqCst);
        self.tt_probe_misses.store(0, Ordering::SeqCst);
        self.cutoffs.store(0, Ordering::SeqCst);
        self.immediate_wins.store(0, Ordering::SeqCst);
    }

    fn record_result(&mut self, score: i16, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Point-in-time copy of a context's counters.
///
/// Search counters cover the most recent `alpha_beta_search` call. The
/// `tt_hits`, `tt_depth_rejected`, `tt_bound_rejected` and `tt_size` fields
/// come from the table and accumulate until the cache is cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub positions_searched: usize,
    pub tt_probes: usize,
    pub tt_hits: usize,
    pub tt_probe_misses: usize,
    pub tt_stores: usize,
    pub tt_depth_rejected: usize,
    pub tt_bound_rejected: usize,
    pub tt_size: usize,
    pub cutoffs: usize,
    pub immediate_wins: usize,
    pub last_score: Option<i16>,
    pub last_duration: Option<Duration>,
}

pub struct SearchContext {
    config: SearchConfig,
    counters: SearchCounters,
    transposition_table: TranspositionTable<PositionKey, Column>,
    ai: Token,
}

impl SearchContext {
    pub fn new(ai: Token) -> Self {
        Self::with_config(ai, SearchConfig::default(), DEFAULT_TT_CAPACITY)
    }

    pub fn with_config(ai: Token, config: SearchConfig, cache_capacity: usize) -> Self {
        Self {
            config,
            counters: SearchCounters::new(),
            transposition_table: TranspositionTable::new(cache_capacity),
            ai,
        }
    }

    pub fn ai(&self) -> Token {
        self.ai
    }

    /// Cached scores are relative to the AI, so a change of sides drops them.
    pub fn set_ai(&mut self, ai: Token) {
        if ai != self.ai {
            self.ai = ai;
            self.transposition_table.clear();
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.config.parallel = parallel;
    }

    pub fn is_parallel(&self) -> bool {
        self.config.parallel
    }

    pub fn set_randomize_ties(&mut self, randomize_ties: bool) {
        self.config.randomize_ties = randomize_ties;
    }

    pub fn clear_cache(&mut self) {
        self.transposition_table.clear();
    }

    pub fn reset_stats(&mut self) {
        self.counters.reset();
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            positions_searched: self.searched_position_count(),
            tt_probes: self.counters.tt_probes.load(Ordering::SeqCst),
            tt_hits: self.tt_hits(),
            tt_probe_misses: self.counters.tt_probe_misses.load(Ordering::SeqCst),
            tt_stores: self.counters.tt_stores.load(Ordering::SeqCst),
            tt_depth_rejected: self.transposition_table.depth_rejected(),
            tt_bound_rejected: self.transposition_table.bound_rejected(),
            tt_size: self.tt_size(),
            cutoffs: self.counters.cutoffs.load(Ordering::SeqCst),
            immediate_wins: self.counters.immediate_wins.load(Ordering::SeqCst),
            last_score: self.last_score(),
            last_duration: self.last_search_duration(),
        }
    }

    pub fn searched_position_count(&self) -> usize {
        self.counters.position_count.load(Ordering::SeqCst)
    }

    pub fn last_score(&self) -> Option<i16> {
        self.counters.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.counters.last_duration
    }

    pub fn tt_hits(&self) -> usize {
        self.transposition_table.hits()
    }

    pub fn tt_size(&self) -> usize {
        self.transposition_table.size()
    }

    fn increment_position_count(&self) {
        self.counters.position_count.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_tt_probes(&self) {
        self.counters.tt_probes.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_tt_misses(&self) {
        self.counters.tt_probe_misses.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_cutoffs(&self) {
        self.counters.cutoffs.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_immediate_wins(&self) {
        self.counters.immediate_wins.fetch_add(1, Ordering::SeqCst);
    }

    /// Probe the table for `board` with `to_move` to play. The cached move is
    /// returned in `board`'s own orientation.
    fn probe(
        &self,
        board: &Board,
        to_move: Token,
        depth: u8,
        alpha: i16,
        beta: i16,
    ) -> (NodeKey, Option<i16>, Option<Column>) {
        self.increment_tt_probes();
        let (key, orientation) = PositionKey::new(board, to_move);
        let (score, tt_move) = self
            .transposition_table
            .probe_with_move(&key, depth, alpha, beta);
        if score.is_none() && tt_move.is_none() {
            self.increment_tt_misses();
        }
        let tt_move = tt_move.map(|column| orientation.apply(column, board.cols()));
        let node_key = NodeKey {
            key,
            orientation,
            cols: board.cols(),
        };
        (node_key, score, tt_move)
    }

    /// Store a result. The move is given in the probed board's orientation
    /// and saved in the canonical one.
    fn store(
        &self,
        node_key: NodeKey,
        score: i16,
        depth: u8,
        bound_type: BoundType,
        best_move: Option<Column>,
    ) {
        self.counters.tt_stores.fetch_add(1, Ordering::SeqCst);
        let NodeKey {
            key,
            orientation,
            cols,
        } = node_key;
        let best_move = best_move.map(|column| orientation.apply(column, cols));
        self.transposition_table
            .store(key, score, depth, bound_type, best_move);
    }
}

/// A probed position, remembered until its result is stored.
struct NodeKey {
    key: PositionKey,
    orientation: Orientation,
    cols: usize,
}

/// Drops `token` into `column`, runs `f` on the resulting board, then takes
/// the token back out.
fn with_move_applied<F, R>(
    board: &mut Board,
    column: Column,
    token: Token,
    f: F,
) -> Result<R, SearchError>
where
    F: FnOnce(&mut Board) -> Result<R, SearchError>,
{
    board
        .apply_move(column, token)
        .expect("move application should succeed in search");

    let result = f(board);

    board
        .undo_move(column)
        .expect("move undo should succeed in search");

    result
}

/// Updates best score and move if new score is better.
/// Returns true if best_score was updated.
fn update_best(
    score: i16,
    candidate: Column,
    maximizing_player: bool,
    best_score: &mut i16,
    best_move: &mut Option<Column>,
) -> bool {
    let is_better = if maximizing_player {
        score > *best_score
    } else {
        score < *best_score
    };

    if is_better {
        *best_score = score;
        *best_move = Some(candidate);
    }
    is_better
}

/// Moves the principal-variation column to the front, keeping the relative
/// order of the rest.
fn reorder_pv_first(candidates: &mut [Column], pv_move: Option<Column>) {
    if let Some(pv) = pv_move {
        if let Some(pos) = candidates.iter().position(|&c| c == pv) {
            if pos > 0 {
                candidates[0..=pos].rotate_right(1);
            }
        }
    }
}

fn mover_win_score(mover: Token, ai: Token) -> i16 {
    if mover == ai {
        WIN_SCORE
    } else {
        LOSS_SCORE
    }
}

/// Searches for the AI's best column.
///
/// # Returns
///
/// - `Ok(outcome)` - The chosen column, its score and every tied column
/// - `Err(SearchError::DepthTooLow)` - If search depth is < 1
/// - `Err(SearchError::GameOver)` - If either side already has a line
/// - `Err(SearchError::NoAvailableMoves)` - If the board is full
#[must_use = "search returns the best move found"]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn alpha_beta_search<E, O>(
    context: &mut SearchContext,
    board: &Board,
    depth: u8,
    evaluator: &E,
    move_orderer: &O,
) -> Result<SearchOutcome, SearchError>
where
    E: Evaluator,
    O: MoveOrderer,
{
    debug!("alpha-beta search depth: {}", depth);
    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    match game_ending(board) {
        Some(GameEnding::Win(_)) => return Err(SearchError::GameOver),
        Some(GameEnding::Draw) => return Err(SearchError::NoAvailableMoves),
        None => {}
    }

    context.reset_stats();
    let hits_before = context.tt_hits();
    let start = Instant::now();
    let ai = context.ai;
    let mut candidates = move_orderer.candidate_columns(board, ai);
    if candidates.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }
    debug!("{} candidate columns for {}", candidates.len(), ai);

    let (key, _, pv_move) = context.probe(board, ai, depth, i16::MIN, i16::MAX);
    reorder_pv_first(&mut candidates, pv_move);

    let winning: ColumnList = candidates
        .iter()
        .copied()
        .filter(|&column| board.completes_line(column, ai))
        .collect();

    let (score, tied) = if !winning.is_empty() {
        context.increment_immediate_wins();
        (WIN_SCORE, winning)
    } else {
        let scores = if context.is_parallel() {
            search_root_parallel(context, board, &candidates, depth, evaluator, move_orderer)?
        } else {
            search_root_sequential(context, board, &candidates, depth, evaluator, move_orderer)?
        };
        let best_score = scores
            .iter()
            .map(|&(_, score)| score)
            .max()
            .ok_or(SearchError::NoAvailableMoves)?;
        let tied: ColumnList = scores
            .iter()
            .filter(|&&(_, score)| score == best_score)
            .map(|&(column, _)| column)
            .collect();
        (best_score, tied)
    };

    let column = if context.config.randomize_ties {
        tied.choose(&mut rand::thread_rng()).copied()
    } else {
        tied.first().copied()
    }
    .ok_or(SearchError::NoAvailableMoves)?;

    context.store(key, score, depth, BoundType::Exact, Some(column));

    let elapsed = start.elapsed();
    context.counters.record_result(score, elapsed);
    debug!(
        "chose column {} (score {}, {} tied) in {:?}; {} positions, {} cache hits",
        column,
        score,
        tied.len(),
        elapsed,
        context.searched_position_count(),
        context.tt_hits() - hits_before,
    );

    Ok(SearchOutcome {
        column,
        score,
        tied,
    })
}

fn search_root_sequential<E, O>(
    context: &SearchContext,
    board: &Board,
    candidates: &[Column],
    depth: u8,
    evaluator: &E,
    move_orderer: &O,
) -> Result<Vec<(Column, i16)>, SearchError>
where
    E: Evaluator,
    O: MoveOrderer,
{
    let ai = context.ai;
    let mut board = board.clone();
    let mut best_score = i16::MIN;
    let mut scores = Vec::with_capacity(candidates.len());

    for &column in candidates {
        // One below the best so far: a child that ties the best still lands
        // strictly inside the window and comes back exact.
        let alpha = best_score.saturating_sub(1);
        let score = with_move_applied(&mut board, column, ai, |board| {
            alpha_beta_minimax(
                context,
                board,
                evaluator,
                move_orderer,
                depth - 1,
                alpha,
                i16::MAX,
                ai.other(),
            )
        })?;
        best_score = max(best_score, score);
        scores.push((column, score));
    }

    Ok(scores)
}

fn search_root_parallel<E, O>(
    context: &SearchContext,
    board: &Board,
    candidates: &[Column],
    depth: u8,
    evaluator: &E,
    move_orderer: &O,
) -> Result<Vec<(Column, i16)>, SearchError>
where
    E: Evaluator,
    O: MoveOrderer,
{
    let ai = context.ai;
    candidates
        .par_iter()
        .map(|&column| {
            let mut cloned_board = board.clone();
            with_move_applied(&mut cloned_board, column, ai, |board| {
                alpha_beta_minimax(
                    context,
                    board,
                    evaluator,
                    move_orderer,
                    depth - 1,
                    i16::MIN,
                    i16::MAX,
                    ai.other(),
                )
            })
            .map(|score| (column, score))
        })
        .collect()
}

/// Core alpha-beta minimax search with pruning.
///
/// # Parameters
///
/// - `depth` - Remaining search depth (decrements each ply)
/// - `alpha` - Lower bound of search window
/// - `beta` - Upper bound of search window
/// - `to_move` - Token dropped at this node; the node maximizes when it is
///   the context's AI
///
/// # Returns
///
/// A fail-soft score: exact inside `(alpha, beta)`, otherwise a bound on the
/// true value on the side it failed.
#[allow(clippy::too_many_arguments)]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub(crate) fn alpha_beta_minimax<E, O>(
    context: &SearchContext,
    board: &mut Board,
    evaluator: &E,
    move_orderer: &O,
    depth: u8,
    mut alpha: i16,
    mut beta: i16,
    to_move: Token,
) -> Result<i16, SearchError>
where
    E: Evaluator,
    O: MoveOrderer,
{
    context.increment_position_count();
    let ai = context.ai;

    if let Some(score) = terminal_score(board, ai) {
        return Ok(score);
    }

    if depth == 0 {
        return Ok(evaluator.evaluate(board, ai));
    }

    let (key, cutoff_score, tt_move) = context.probe(board, to_move, depth, alpha, beta);
    if let Some(score) = cutoff_score {
        return Ok(score);
    }

    let mut candidates = move_orderer.candidate_columns(board, to_move);
    if candidates.is_empty() {
        return Ok(evaluator.evaluate(board, ai));
    }
    reorder_pv_first(&mut candidates, tt_move);

    if let Some(&winning) = candidates
        .iter()
        .find(|&&column| board.completes_line(column, to_move))
    {
        context.increment_immediate_wins();
        let score = mover_win_score(to_move, ai);
        context.store(key, score, depth, BoundType::Exact, Some(winning));
        return Ok(score);
    }

    let maximizing_player = to_move == ai;
    let original_alpha = alpha;
    let original_beta = beta;
    let mut best_move = None;
    let mut best_score = if maximizing_player {
        i16::MIN
    } else {
        i16::MAX
    };

    for &column in candidates.iter() {
        let score = with_move_applied(board, column, to_move, |board| {
            alpha_beta_minimax(
                context,
                board,
                evaluator,
                move_orderer,
                depth - 1,
                alpha,
                beta,
                to_move.other(),
            )
        })?;

        update_best(
            score,
            column,
            maximizing_player,
            &mut best_score,
            &mut best_move,
        );

        if maximizing_player {
            alpha = max(alpha, score);
        } else {
            beta = min(beta, score);
        }

        if beta <= alpha {
            context.increment_cutoffs();
            break;
        }
    }

    let bound_type = BoundType::classify(best_score, original_alpha, original_beta);
    context.store(key, best_score, depth, bound_type, best_move);

    Ok(best_score)
}
