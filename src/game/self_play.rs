//! Computer-versus-computer games.

use log::info;

use crate::board::{Board, Column, Token};
use crate::evaluate::{game_ending, GameEnding};

use super::engine::{Engine, EngineConfig, EngineError};

#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    pub board: Board,
    /// Token that drops first.
    pub first: Token,
    /// Number of opening moves picked at random instead of searched.
    pub random_opening: usize,
    pub engine: EngineConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            board: Board::default(),
            first: Token::X,
            random_opening: 0,
            engine: EngineConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelfPlayMove {
    pub token: Token,
    pub column: Column,
    /// Search score from the mover's point of view, `None` for random moves.
    pub score: Option<i16>,
}

#[derive(Clone, Debug)]
pub struct SelfPlayResult {
    pub board: Board,
    pub moves: Vec<SelfPlayMove>,
    pub ending: GameEnding,
}

/// Plays a game between two engines, one per token, until someone completes
/// a line or the board fills up. `on_move` sees the board after each drop.
pub fn self_play<F>(config: SelfPlayConfig, mut on_move: F) -> Result<SelfPlayResult, EngineError>
where
    F: FnMut(&Board, &SelfPlayMove),
{
    let mut engines = Vec::with_capacity(2);
    for token in Token::ALL.iter() {
        let mut engine = Engine::with_config(config.engine.clone())?;
        engine.configure_sides(*token, token.other())?;
        engines.push(engine);
    }

    let mut board = config.board;
    let mut to_move = config.first;
    let mut moves = Vec::new();

    let ending = loop {
        if let Some(ending) = game_ending(&board) {
            break ending;
        }

        let engine = match to_move {
            Token::X => &mut engines[0],
            Token::O => &mut engines[1],
        };
        let (column, score) = if moves.len() < config.random_opening {
            (engine.random_move(&board)?, None)
        } else {
            let depth = match engine.config().search_depth {
                Some(depth) => depth,
                None => engine.estimate_depth(&board),
            };
            let (column, score) = engine.recommend_move_with_score(&board, depth)?;
            (column, Some(score))
        };

        board
            .apply_move(column, to_move)
            .map_err(|error| EngineError::Board { error })?;
        let played = SelfPlayMove {
            token: to_move,
            column,
            score,
        };
        on_move(&board, &played);
        moves.push(played);
        to_move = to_move.other();
    };

    info!("self-play finished after {} moves: {:?}", moves.len(), ending);
    Ok(SelfPlayResult {
        board,
        moves,
        ending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> SelfPlayConfig {
        SelfPlayConfig {
            engine: EngineConfig {
                search_depth: Some(2),
                ..EngineConfig::default()
            },
            ..SelfPlayConfig::default()
        }
    }

    #[test]
    fn test_self_play_reaches_an_ending() {
        let mut seen = 0;
        let result = self_play(quick_config(), |_, _| seen += 1).unwrap();

        assert_eq!(seen, result.moves.len());
        assert_eq!(result.board.token_count(), result.moves.len());
        assert_eq!(game_ending(&result.board), Some(result.ending));
        for (index, played) in result.moves.iter().enumerate() {
            let expected = if index % 2 == 0 { Token::X } else { Token::O };
            assert_eq!(played.token, expected);
        }
    }

    #[test]
    fn test_random_opening_moves_have_no_score() {
        let config = SelfPlayConfig {
            random_opening: 3,
            ..quick_config()
        };
        let result = self_play(config, |_, _| {}).unwrap();
        assert!(result.moves.len() >= 7);
        assert!(result.moves[..3].iter().all(|played| played.score.is_none()));
        assert!(result.moves[3..].iter().all(|played| played.score.is_some()));
    }

    #[test]
    fn test_winner_made_the_last_move() {
        let result = self_play(quick_config(), |_, _| {}).unwrap();
        if let GameEnding::Win(winner) = result.ending {
            assert_eq!(result.moves.last().map(|played| played.token), Some(winner));
        }
    }
}
