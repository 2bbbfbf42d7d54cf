//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, estimate_depth::EstimateDepthArgs,
    watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "connect-four",
    about = "A Connect Four engine using alpha-beta search"
)]
pub enum ConnectFour {
    #[structopt(
        name = "calculate-best-move",
        about = "Recommend a column for the position given with `--board` (rows from top to bottom separated by `/`, cells `.`, `X` or `O`). The AI plays `--ai` (default: the side to move, X going first). Without `--depth` the depth is estimated from the position's complexity."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "estimate-depth",
        about = "Report the complexity of the position given with `--board` and the search depth it earns."
    )]
    EstimateDepth(EstimateDepthArgs),
    #[structopt(
        name = "watch",
        about = "Watch the computer play against itself at the given `--depth` (default: estimated per move) on a `--rows` by `--cols` board (default: 6 by 7)."
    )]
    Watch(WatchArgs),
}

impl crate::cli::commands::Command for ConnectFour {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            CalculateBestMove(cmd),
            EstimateDepth(cmd),
            Watch(cmd),
        }
    }
}
