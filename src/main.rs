mod cli;
#[cfg(feature = "instrumentation")]
mod instrumentation;

use cli::commands::Command;
use structopt::StructOpt;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    instrumentation::init_tracing();

    cli::ConnectFour::from_args().execute();

    #[cfg(feature = "instrumentation")]
    instrumentation::print_timing_statistics();
}
