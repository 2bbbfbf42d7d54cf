use connect_four::alpha_beta_searcher::{SearchConfig, SearchContext};
use connect_four::board::{Board, Token};
use connect_four::connect_four_search::{search_best_move, ConnectFourEvaluator};

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let middlegame: Board = "......./......./...O.../..XX.../.OXOX../XOXOOX."
        .parse()
        .unwrap();

    c.bench_function("alpha beta empty board depth 6", |b| {
        b.iter(|| search(&Board::default(), 6, false))
    });
    c.bench_function("alpha beta middlegame depth 7 sequential", |b| {
        b.iter(|| search(&middlegame, 7, false))
    });
    c.bench_function("alpha beta middlegame depth 7 parallel", |b| {
        b.iter(|| search(&middlegame, 7, true))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn search(board: &Board, depth: u8, parallel: bool) {
    let config = SearchConfig {
        parallel,
        randomize_ties: false,
    };
    let mut context = SearchContext::with_config(Token::O, config, 1 << 16);
    search_best_move(&mut context, board, depth, &ConnectFourEvaluator::default()).unwrap();
}
