//! Estimate depth command - report how much search a position earns.

use connect_four::board::{Board, Token};
use connect_four::game::engine::Engine;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct EstimateDepthArgs {
    #[structopt(long = "board")]
    pub board: Board,
    #[structopt(long = "ai", help = "Token the engine plays (default: the side to move)")]
    pub ai: Option<Token>,
}

impl Command for EstimateDepthArgs {
    fn execute(self) {
        let mut engine = Engine::new();
        let ai = self.ai.unwrap_or_else(|| self.board.side_to_move(Token::X));
        if let Err(err) = engine.configure_sides(ai, ai.other()) {
            eprintln!("Failed to configure sides: {}", err);
            return;
        }

        let estimate = engine.estimate_complexity(&self.board);
        println!("complexity: {:.2}", estimate.complexity);
        println!("{} threats: {}", ai, estimate.ai_threats);
        println!("{} threats: {}", ai.other(), estimate.opponent_threats);
        println!("depth: {}", estimate.depth);
    }
}
