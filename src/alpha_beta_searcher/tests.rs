//! Tests for the alpha-beta search against a plain minimax reference.
//!
//! Test coverage:
//! - Root scores and tied columns match full-width minimax (sequential and parallel)
//! - Fail-soft bounds stay sound when the cache is reused across windows
//! - Repeated searches on an unchanged board and cache return the same score
//! - Mirrored boards share cache entries and get mirrored columns back
//! - Error handling (zero depth, finished games, full boards)

use super::search::alpha_beta_minimax;
use super::*;
use crate::board::{Board, Column, Token};
use crate::connect_four_position;
use crate::evaluate::{self, terminal_score, HeuristicWeights, WIN_SCORE};

#[derive(Clone, Default)]
struct WindowEvaluator {
    weights: HeuristicWeights,
}

impl Evaluator for WindowEvaluator {
    fn evaluate(&self, board: &Board, perspective: Token) -> i16 {
        evaluate::score(board, perspective, &self.weights)
    }
}

fn naive_minimax(board: &mut Board, depth: u8, to_move: Token, ai: Token) -> i16 {
    if let Some(score) = terminal_score(board, ai) {
        return score;
    }
    if depth == 0 {
        return WindowEvaluator::default().evaluate(board, ai);
    }

    let mut scores = Vec::new();
    for column in board.legal_columns() {
        board.apply_move(column, to_move).unwrap();
        scores.push(naive_minimax(board, depth - 1, to_move.other(), ai));
        board.undo_move(column).unwrap();
    }

    if to_move == ai {
        scores.into_iter().max().unwrap()
    } else {
        scores.into_iter().min().unwrap()
    }
}

/// Exact value of every root column, the AI to move.
fn naive_root(board: &Board, depth: u8, ai: Token) -> Vec<(Column, i16)> {
    let mut board = board.clone();
    let mut scores = Vec::new();
    for column in board.legal_columns() {
        board.apply_move(column, ai).unwrap();
        scores.push((column, naive_minimax(&mut board, depth - 1, ai.other(), ai)));
        board.undo_move(column).unwrap();
    }
    scores
}

fn naive_best(scores: &[(Column, i16)]) -> (i16, Vec<usize>) {
    let best = scores.iter().map(|&(_, score)| score).max().unwrap();
    let mut tied: Vec<usize> = scores
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(column, _)| column.number())
        .collect();
    tied.sort_unstable();
    (best, tied)
}

fn sorted_numbers(columns: &[Column]) -> Vec<usize> {
    let mut numbers: Vec<usize> = columns.iter().map(|column| column.number()).collect();
    numbers.sort_unstable();
    numbers
}

fn deterministic_context(ai: Token, parallel: bool) -> SearchContext {
    let config = SearchConfig {
        parallel,
        randomize_ties: false,
    };
    SearchContext::with_config(ai, config, 1024)
}

fn search(context: &mut SearchContext, board: &Board, depth: u8) -> SearchOutcome {
    alpha_beta_search(
        context,
        board,
        depth,
        &WindowEvaluator::default(),
        &CenterOutOrderer,
    )
    .unwrap()
}

/// O to move, nobody has three in a row.
fn opening_position() -> Board {
    connect_four_position! {
        .......
        .......
        .......
        ...O...
        ..XX...
        .OXOX..
    }
}

/// X to move, nobody can win on the spot.
fn middlegame_position() -> Board {
    connect_four_position! {
        .......
        .......
        ..O....
        ..XO...
        ..OXX..
        .XOXO..
    }
}

fn test_positions() -> Vec<(Board, Token)> {
    vec![
        (opening_position(), Token::O),
        (middlegame_position(), Token::X),
        (Board::default(), Token::X),
    ]
}

#[test]
fn test_sequential_search_matches_minimax() {
    for (board, ai) in test_positions() {
        for depth in 1..=4 {
            let mut context = deterministic_context(ai, false);
            let outcome = search(&mut context, &board, depth);
            let (best, tied) = naive_best(&naive_root(&board, depth, ai));

            assert_eq!(outcome.score, best, "depth {}\n{}", depth, board);
            assert_eq!(sorted_numbers(&outcome.tied), tied, "depth {}\n{}", depth, board);
            assert!(tied.contains(&outcome.column.number()));
        }
    }
}

#[test]
fn test_parallel_vs_sequential_same_result() {
    for (board, ai) in test_positions() {
        let mut sequential = deterministic_context(ai, false);
        let mut parallel = deterministic_context(ai, true);

        let sequential_outcome = search(&mut sequential, &board, 4);
        let parallel_outcome = search(&mut parallel, &board, 4);

        assert_eq!(sequential_outcome.score, parallel_outcome.score);
        assert_eq!(
            sorted_numbers(&sequential_outcome.tied),
            sorted_numbers(&parallel_outcome.tied)
        );
    }
}

#[test]
fn test_bounds_stay_sound_with_a_shared_cache() {
    let windows = [
        (i16::MIN, i16::MAX),
        (-20, 20),
        (0, 1),
        (5, 6),
        (-100, -50),
        (50, 100),
        (-3, 3),
    ];

    for (board, ai) in test_positions() {
        let to_move = ai;
        let depth = 4;
        let exact = naive_minimax(&mut board.clone(), depth, to_move, ai);
        let context = deterministic_context(ai, false);

        // Twice, so the second pass probes entries stored under other windows.
        for &(alpha, beta) in windows.iter().chain(windows.iter().rev()) {
            let mut scratch = board.clone();
            let score = alpha_beta_minimax(
                &context,
                &mut scratch,
                &WindowEvaluator::default(),
                &CenterOutOrderer,
                depth,
                alpha,
                beta,
                to_move,
            )
            .unwrap();

            assert_eq!(scratch, board, "search must leave the board untouched");
            if score <= alpha {
                assert!(exact <= score, "fail-low {} above exact {}", score, exact);
            } else if score >= beta {
                assert!(exact >= score, "fail-high {} below exact {}", score, exact);
            } else {
                assert_eq!(score, exact, "window ({}, {})", alpha, beta);
            }
        }
        assert!(context.tt_hits() > 0);
    }
}

#[test]
fn test_repeated_search_is_idempotent() {
    for parallel in [false, true] {
        let board = middlegame_position();
        let mut context = deterministic_context(Token::X, parallel);

        let first = search(&mut context, &board, 5);
        let second = search(&mut context, &board, 5);
        let third = search(&mut context, &board, 5);

        assert_eq!(first.score, second.score);
        assert_eq!(second.score, third.score);
        assert_eq!(sorted_numbers(&first.tied), sorted_numbers(&third.tied));
        assert!(context.tt_hits() > 0);
    }
}

#[test]
fn test_deeper_search_after_shallow_one_is_unaffected() {
    let board = opening_position();
    let mut warm = deterministic_context(Token::O, false);
    search(&mut warm, &board, 2);
    search(&mut warm, &board, 3);
    let warm_outcome = search(&mut warm, &board, 4);

    let mut cold = deterministic_context(Token::O, false);
    let cold_outcome = search(&mut cold, &board, 4);

    assert_eq!(warm_outcome.score, cold_outcome.score);
    assert_eq!(
        sorted_numbers(&warm_outcome.tied),
        sorted_numbers(&cold_outcome.tied)
    );
}

#[test]
fn test_mirrored_board_gets_mirrored_columns() {
    let board = middlegame_position();
    let mirrored = board.mirrored();
    let cols = board.cols();
    let mut context = deterministic_context(Token::X, false);

    let outcome = search(&mut context, &board, 4);
    let hits_before = context.tt_hits();
    let mirrored_outcome = search(&mut context, &mirrored, 4);

    assert_eq!(outcome.score, mirrored_outcome.score);
    let expected: Vec<Column> = outcome
        .tied
        .iter()
        .map(|column| column.mirrored(cols))
        .collect();
    assert_eq!(sorted_numbers(&mirrored_outcome.tied), sorted_numbers(&expected));
    assert!(context.tt_hits() > hits_before);
}

#[test]
fn test_takes_immediate_win() {
    let board = connect_four_position! {
        .......
        .......
        .......
        .......
        ....O..
        XXX.OO.
    };
    for parallel in [false, true] {
        let mut context = deterministic_context(Token::X, parallel);
        let outcome = search(&mut context, &board, 3);
        assert_eq!(outcome.column.number(), 4);
        assert_eq!(outcome.score, WIN_SCORE);
        assert_eq!(sorted_numbers(&outcome.tied), vec![4]);
        assert!(context.stats().immediate_wins >= 1);
    }
}

#[test]
fn test_random_ties_pick_a_tied_column() {
    let board = opening_position();
    let mut context = SearchContext::new(Token::O);
    for _ in 0..10 {
        let outcome = search(&mut context, &board, 3);
        assert!(outcome.tied.contains(&outcome.column));
    }
}

#[test]
fn test_search_returns_error_for_zero_depth() {
    let mut context = SearchContext::new(Token::X);
    let result = alpha_beta_search(
        &mut context,
        &Board::default(),
        0,
        &WindowEvaluator::default(),
        &CenterOutOrderer,
    );
    assert_eq!(result, Err(SearchError::DepthTooLow));
}

#[test]
fn test_search_returns_error_for_full_board() {
    let board: Board = "XXOOXXO/OOXXOOX/XXOOXXO/OOXXOOX/XXOOXXO/OOXXOOX"
        .parse()
        .unwrap();
    let mut context = SearchContext::new(Token::X);
    let result = alpha_beta_search(
        &mut context,
        &board,
        3,
        &WindowEvaluator::default(),
        &CenterOutOrderer,
    );
    assert_eq!(result, Err(SearchError::NoAvailableMoves));
}

#[test]
fn test_search_returns_error_when_game_is_over() {
    let board = connect_four_position! {
        .......
        .......
        .......
        .......
        OOO....
        XXXX...
    };
    let mut context = SearchContext::new(Token::O);
    let result = alpha_beta_search(
        &mut context,
        &board,
        3,
        &WindowEvaluator::default(),
        &CenterOutOrderer,
    );
    assert_eq!(result, Err(SearchError::GameOver));
}

#[test]
fn test_changing_ai_clears_cache() {
    let mut context = deterministic_context(Token::X, false);
    search(&mut context, &middlegame_position(), 3);
    assert!(context.tt_size() > 0);

    context.set_ai(Token::X);
    assert!(context.tt_size() > 0);

    context.set_ai(Token::O);
    assert_eq!(context.tt_size(), 0);
    assert_eq!(context.ai(), Token::O);
}

#[test]
fn test_stats_record_last_search() {
    let mut context = deterministic_context(Token::X, false);
    let outcome = search(&mut context, &Board::default(), 3);

    let stats = context.stats();
    assert_eq!(stats.last_score, Some(outcome.score));
    assert!(stats.last_duration.is_some());
    assert!(stats.positions_searched > 0);
    assert!(stats.tt_stores > 0);

    context.reset_stats();
    assert_eq!(context.stats().positions_searched, 0);
    assert_eq!(context.last_score(), None);
}

#[test]
fn test_position_count_covers_only_the_last_search() {
    let board = opening_position();
    let mut context = deterministic_context(Token::O, false);

    search(&mut context, &board, 4);
    let cold = context.searched_position_count();
    search(&mut context, &board, 4);
    let warm = context.searched_position_count();

    assert!(warm > 0);
    assert!(warm <= cold, "warm {} vs cold {}", warm, cold);
    assert_eq!(context.stats().positions_searched, warm);
}
