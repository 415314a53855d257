use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color, Rank};
use std::sync::Arc;

/// Pure material count. Positive favours Red; a side with no pieces left
/// scores as an infinite loss.
pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
}

impl MaterialEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    pub fn score_board(&self, board: &Board) -> f64 {
        if board.count_pieces(Color::Red) == 0 {
            return f64::NEG_INFINITY;
        }
        if board.count_pieces(Color::White) == 0 {
            return f64::INFINITY;
        }

        board
            .pieces()
            .map(|(_, piece)| {
                let weight = match piece.rank {
                    Rank::Man => self.config.man_value,
                    Rank::King => self.config.king_value,
                };
                weight * f64::from(piece.color.sign())
            })
            .sum()
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        self.score_board(board)
    }
}
