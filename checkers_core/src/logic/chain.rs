use crate::logic::board::{Board, Color, Coord};
use crate::logic::rules::IllegalMove;

/// Expands single captures into every maximal capture sequence.
///
/// A piece that lands where it can capture again must keep going, so a chain
/// only ends on a square with no further capture for that piece. Each returned
/// path is `[start, landing1, landing2, ...]`.
pub struct JumpChainBuilder {
    color: Color,
}

impl JumpChainBuilder {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }

    /// Builds every chain that starts with one of `jumps` on `board`.
    pub fn build(
        &self,
        board: &Board,
        jumps: &[(Coord, Coord)],
    ) -> Result<Vec<Vec<Coord>>, IllegalMove> {
        let mut chains = Vec::new();
        for &(from, to) in jumps {
            let mut path = vec![from];
            self.extend(board, from, to, &mut path, &mut chains)?;
        }
        Ok(chains)
    }

    /// Convenience wrapper: every maximal chain for `color` from any square.
    pub fn collect(&self, board: &Board) -> Result<Vec<Vec<Coord>>, IllegalMove> {
        let jumps = board.calculate_possible_jumps(self.color, None);
        self.build(board, &jumps)
    }

    fn extend(
        &self,
        board: &Board,
        from: Coord,
        to: Coord,
        path: &mut Vec<Coord>,
        chains: &mut Vec<Vec<Coord>>,
    ) -> Result<(), IllegalMove> {
        let mut next = *board;
        next.jump_piece(from, to)?;
        path.push(to);

        let continuations = next.calculate_possible_jumps(self.color, Some(to));
        if continuations.is_empty() {
            log::trace!("jump chain complete: {path:?}");
            chains.push(path.clone());
        } else {
            for &(hop_from, hop_to) in &continuations {
                self.extend(&next, hop_from, hop_to, path, chains)?;
            }
        }

        path.pop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Piece;

    fn c(row: i8, col: i8) -> Coord {
        Coord::new(row, col)
    }

    fn replay(board: &Board, path: &[Coord]) -> Board {
        let mut board = *board;
        for hop in path.windows(2) {
            board.jump_piece(hop[0], hop[1]).unwrap();
        }
        board
    }

    #[test]
    fn test_single_jump_is_its_own_chain() {
        let mut board = Board::empty();
        board.place(c(3, 3), Piece::man(Color::Red)).unwrap();
        board.place(c(4, 4), Piece::man(Color::White)).unwrap();

        let chains = JumpChainBuilder::new(Color::Red).collect(&board).unwrap();
        assert_eq!(chains, vec![vec![c(3, 3), c(5, 5)]]);
    }

    #[test]
    fn test_double_jump_must_continue() {
        let mut board = Board::empty();
        board.place(c(0, 0), Piece::man(Color::Red)).unwrap();
        board.place(c(1, 1), Piece::man(Color::White)).unwrap();
        board.place(c(3, 3), Piece::man(Color::White)).unwrap();

        let chains = JumpChainBuilder::new(Color::Red).collect(&board).unwrap();
        assert_eq!(chains, vec![vec![c(0, 0), c(2, 2), c(4, 4)]]);
    }

    #[test]
    fn test_branching_chain() {
        // After (2,2)->(4,4) the man can go right over (5,5) or left over (5,3).
        let mut board = Board::empty();
        board.place(c(2, 2), Piece::man(Color::Red)).unwrap();
        board.place(c(3, 3), Piece::man(Color::White)).unwrap();
        board.place(c(5, 5), Piece::man(Color::White)).unwrap();
        board.place(c(5, 3), Piece::man(Color::White)).unwrap();

        let chains = JumpChainBuilder::new(Color::Red).collect(&board).unwrap();
        assert_eq!(
            chains,
            vec![
                vec![c(2, 2), c(4, 4), c(6, 6)],
                vec![c(2, 2), c(4, 4), c(6, 2)],
            ]
        );

        for chain in &chains {
            let after = replay(&board, chain);
            let jumps = chain.len() - 1;
            assert_eq!(after.count_pieces(Color::White), 3 - jumps);
            assert_eq!(after.piece_at(chain[chain.len() - 1]), Some(Piece::man(Color::Red)));
            assert_eq!(after.count_pieces(Color::Red), 1);
        }
    }

    #[test]
    fn test_king_chain_does_not_recapture() {
        // A king circling four men captures each once and stops.
        let mut board = Board::empty();
        board.place(c(2, 2), Piece::king(Color::Red)).unwrap();
        for &(row, col) in &[(3, 3), (5, 3), (5, 1), (3, 1)] {
            board.place(c(row, col), Piece::man(Color::White)).unwrap();
        }

        let chains = JumpChainBuilder::new(Color::Red).collect(&board).unwrap();
        assert!(!chains.is_empty());
        for chain in &chains {
            let after = replay(&board, chain);
            assert_eq!(after.count_pieces(Color::White), 4 - (chain.len() - 1));
            assert!(after
                .calculate_possible_jumps(Color::Red, Some(chain[chain.len() - 1]))
                .is_empty());
        }
        assert!(chains.iter().any(|chain| chain.len() == 5));
    }

    #[test]
    fn test_no_jumps_yields_no_chains() {
        let chains = JumpChainBuilder::new(Color::Red).collect(&Board::new()).unwrap();
        assert!(chains.is_empty());
    }
}
