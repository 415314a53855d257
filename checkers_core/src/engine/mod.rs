use crate::logic::board::Board;
use crate::logic::game::{GameState, Move};
use crate::logic::rules::IllegalMove;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimit {
    /// Deepest ply that still gets expanded; the root is ply 1.
    Depth(u8),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    /// Minimax value of the chosen move, from Red's point of view.
    pub score: f64,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> f64;
}

pub trait Searcher {
    fn search(
        &mut self,
        game_state: &GameState,
        limit: SearchLimit,
    ) -> Result<Option<(Move, SearchStats)>, IllegalMove>;
}
