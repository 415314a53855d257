//! Checkers rules engine and minimax search.
//!
//! `logic` holds the board, jump-chain collection and turn handling, `engine`
//! holds evaluation and search, and `player` exposes the capability trait that
//! front ends drive a match through.

pub mod engine;
pub mod logic;
pub mod player;
