pub mod engine;
pub mod self_play;
