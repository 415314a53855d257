use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, SearchLimit, SearchStats, Searcher};
use crate::logic::board::Color;
use crate::logic::game::{GameState, GameStatus, Move};
use crate::logic::rules::IllegalMove;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

/// Depth-limited minimax over copied game states.
///
/// Scores are always from Red's point of view; `EngineConfig::maximize`
/// decides which way the root looks. Alpha and beta are carried through every
/// call, but siblings are only cut when `EngineConfig::alpha_beta` is set.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    rng: StdRng,
    nodes_searched: u64,
    max_depth: u8,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: MaterialEvaluator::new(config.clone()),
            rng: Self::make_rng(config.seed),
            max_depth: config.max_depth,
            config,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }

    /// Searches to the configured depth and returns only the move.
    pub fn determine_move(&mut self, state: &GameState) -> Result<Option<Move>, IllegalMove> {
        let limit = SearchLimit::Depth(self.config.max_depth);
        Ok(self.search(state, limit)?.map(|(mv, _)| mv))
    }

    fn static_score(&self, state: &GameState) -> f64 {
        match state.status {
            GameStatus::Won(Color::Red) => f64::INFINITY,
            GameStatus::Won(Color::White) => f64::NEG_INFINITY,
            GameStatus::Playing => self.evaluator.evaluate(&state.board),
        }
    }

    fn root(&mut self, state: &GameState, maximize: bool) -> Result<Option<(Move, f64)>, IllegalMove> {
        self.nodes_searched += 1;
        if state.status != GameStatus::Playing {
            return Ok(None);
        }

        let mut moves = state.determine_legal_moves()?.moves;
        if moves.is_empty() {
            return Ok(None);
        }
        moves.shuffle(&mut self.rng);

        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut value = if maximize {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_idx = 0;

        for (idx, mv) in moves.iter().enumerate() {
            let mut child = state.clone();
            child.play_turn(mv)?;
            let score = self.minimax(&child, !maximize, 2, alpha, beta)?;

            // Ties go to the later move in the shuffled order. A pruned child
            // only reports a bound, so with cutoffs enabled it has to be
            // strictly better to take over.
            let takes_over = match (maximize, self.config.alpha_beta) {
                (true, false) => score >= value,
                (true, true) => score > value,
                (false, false) => score <= value,
                (false, true) => score < value,
            };
            if takes_over {
                best_idx = idx;
            }

            if maximize {
                value = value.max(score);
                alpha = alpha.max(value);
                if self.config.alpha_beta && value >= beta {
                    break;
                }
            } else {
                value = value.min(score);
                beta = beta.min(value);
                if self.config.alpha_beta && value <= alpha {
                    break;
                }
            }
        }

        Ok(Some((moves.swap_remove(best_idx), value)))
    }

    fn minimax(
        &mut self,
        state: &GameState,
        maximize: bool,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64, IllegalMove> {
        self.nodes_searched += 1;

        let score = self.static_score(state);
        if depth >= self.max_depth || score.is_infinite() {
            return Ok(score);
        }

        let mut moves = state.determine_legal_moves()?.moves;
        if moves.is_empty() {
            // The side to move is stuck and loses.
            return Ok(if maximize {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        moves.shuffle(&mut self.rng);

        let mut value = if maximize {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for mv in &moves {
            let mut child = state.clone();
            child.play_turn(mv)?;
            let score = self.minimax(&child, !maximize, depth + 1, alpha, beta)?;

            if maximize {
                value = value.max(score);
                alpha = alpha.max(value);
                if self.config.alpha_beta && value >= beta {
                    break;
                }
            } else {
                value = value.min(score);
                beta = beta.min(value);
                if self.config.alpha_beta && value <= alpha {
                    break;
                }
            }
        }
        Ok(value)
    }
}

impl Searcher for MinimaxEngine {
    fn search(
        &mut self,
        game_state: &GameState,
        limit: SearchLimit,
    ) -> Result<Option<(Move, SearchStats)>, IllegalMove> {
        let SearchLimit::Depth(depth) = limit;
        self.max_depth = depth;
        self.nodes_searched = 0;
        let start = Instant::now();

        let Some((best_move, score)) = self.root(game_state, self.config.maximize)? else {
            return Ok(None);
        };

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            score,
        };
        log::debug!("Computer evaluation: {score}");
        log::debug!("Chosen {}: {best_move} ({} nodes)", best_move.kind(), stats.nodes);
        Ok(Some((best_move, stats)))
    }
}
