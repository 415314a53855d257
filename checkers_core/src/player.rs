//! Who picks the moves.
//!
//! Front ends drive a match by asking the active [`Player`] for its kind:
//! interactive players are fed moves from user input, AI players are asked
//! for one through [`Player::determine_move`].

use crate::engine::config::EngineConfig;
use crate::engine::search::MinimaxEngine;
use crate::engine::{SearchLimit, SearchStats, Searcher};
use crate::logic::board::Color;
use crate::logic::game::{GameState, Move};
use crate::logic::rules::IllegalMove;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Interactive,
    Ai,
}

pub trait Player {
    fn kind(&self) -> PlayerKind;

    fn name(&self) -> &str;

    /// A move for the side to move in `state`, or `None` when this player
    /// does not choose automatically or has nothing to play.
    fn determine_move(&mut self, _state: &GameState) -> Result<Option<Move>, IllegalMove> {
        Ok(None)
    }
}

pub struct InteractivePlayer {
    name: String,
}

impl InteractivePlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for InteractivePlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Interactive
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    rng: StdRng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Ai
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn determine_move(&mut self, state: &GameState) -> Result<Option<Move>, IllegalMove> {
        let legal = state.determine_legal_moves()?;
        Ok(legal.moves.choose(&mut self.rng).cloned())
    }
}

pub struct MinimaxPlayer {
    name: String,
    engine: MinimaxEngine,
    last_stats: Option<SearchStats>,
}

impl MinimaxPlayer {
    pub fn new(max_depth: u8, maximize: bool) -> Self {
        Self::with_config(EngineConfig {
            max_depth,
            maximize,
            ..EngineConfig::default()
        })
    }

    /// Orients the search for `color`: Red maximizes, White minimizes.
    pub fn for_color(color: Color, max_depth: u8) -> Self {
        Self::new(max_depth, color == Color::Red)
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            name: format!("Minimax(depth {})", config.max_depth),
            engine: MinimaxEngine::new(Arc::new(config)),
            last_stats: None,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.engine.config().max_depth
    }

    pub fn maximize(&self) -> bool {
        self.engine.config().maximize
    }

    pub const fn last_stats(&self) -> Option<&SearchStats> {
        self.last_stats.as_ref()
    }
}

impl Player for MinimaxPlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Ai
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn determine_move(&mut self, state: &GameState) -> Result<Option<Move>, IllegalMove> {
        let limit = SearchLimit::Depth(self.max_depth());
        let found = self.engine.search(state, limit)?;
        self.last_stats = found.as_ref().map(|(_, stats)| *stats);
        Ok(found.map(|(mv, _)| mv))
    }
}
