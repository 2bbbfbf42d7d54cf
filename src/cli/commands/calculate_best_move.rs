//! Calculate best move command - recommend a column for a position.

use connect_four::board::{Board, Token};
use connect_four::game::engine::{Engine, EngineConfig};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(long = "board")]
    pub board: Board,
    #[structopt(long = "ai", help = "Token the engine plays (default: the side to move)")]
    pub ai: Option<Token>,
    #[structopt(short, long)]
    pub depth: Option<u8>,
    #[structopt(long = "sequential", help = "Search root columns on a single thread")]
    pub sequential: bool,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let config = EngineConfig {
            search_depth: self.depth,
            parallel: !self.sequential,
            ..EngineConfig::default()
        };
        let mut engine = match Engine::with_config(config) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("Invalid configuration: {}", err);
                return;
            }
        };

        let ai = self.ai.unwrap_or_else(|| self.board.side_to_move(Token::X));
        if let Err(err) = engine.configure_sides(ai, ai.other()) {
            eprintln!("Failed to configure sides: {}", err);
            return;
        }

        match engine.recommend_move_auto(&self.board) {
            Ok(column) => println!("{}", column),
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
