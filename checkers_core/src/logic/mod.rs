pub mod board;
pub mod chain;
pub mod game;
pub mod rules;
