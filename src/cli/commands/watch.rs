//! Watch command - watch the computer play against itself.

use std::thread::sleep;
use std::time::Duration;

use connect_four::board::{Board, DEFAULT_COLS, DEFAULT_ROWS};
use connect_four::evaluate::GameEnding;
use connect_four::game::engine::EngineConfig;
use connect_four::game::self_play::{self_play, SelfPlayConfig};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(short, long)]
    pub depth: Option<u8>,
    #[structopt(long, default_value = "6")]
    pub rows: usize,
    #[structopt(long, default_value = "7")]
    pub cols: usize,
    #[structopt(
        long = "random-opening",
        default_value = "0",
        help = "Number of opening moves played at random"
    )]
    pub random_opening: usize,
    #[structopt(
        long = "delay",
        default_value = "0",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
}

impl Command for WatchArgs {
    fn execute(self) {
        let board = match Board::new(self.rows, self.cols) {
            Ok(board) => board,
            Err(err) => {
                eprintln!(
                    "Invalid board size (default is {}x{}): {}",
                    DEFAULT_ROWS, DEFAULT_COLS, err
                );
                return;
            }
        };

        let config = SelfPlayConfig {
            board,
            random_opening: self.random_opening,
            engine: EngineConfig {
                search_depth: self.depth,
                ..EngineConfig::default()
            },
            ..SelfPlayConfig::default()
        };

        let delay = Duration::from_millis(self.delay_ms);
        let result = self_play(config, |board, played| {
            match played.score {
                Some(score) => println!("{} plays {} (score {})", played.token, played.column, score),
                None => println!("{} plays {} (random)", played.token, played.column),
            }
            println!("{}", board);
            sleep(delay);
        });

        match result {
            Ok(result) => match result.ending {
                GameEnding::Win(token) => {
                    println!("{} wins after {} moves!", token, result.moves.len())
                }
                GameEnding::Draw => println!("draw!"),
            },
            Err(err) => eprintln!("error: {}", err),
        }
    }
}
