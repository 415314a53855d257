use crate::logic::rules::{ensure_playable, validate_displacement, IllegalMove};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 8;

/// Diagonal directions as (row, col) deltas. Mask planes follow this order.
pub const DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// One boolean plane per entry of [`DIRECTIONS`], indexed `[direction][row][col]`.
pub type DirectionMask = [[[bool; BOARD_SIZE]; BOARD_SIZE]; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    White,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Red => Self::White,
            Self::White => Self::Red,
        }
    }

    /// +1 for Red (player one), -1 for White (player two).
    pub const fn sign(self) -> i8 {
        match self {
            Self::Red => 1,
            Self::White => -1,
        }
    }

    /// Row delta a man of this color advances by.
    pub const fn forward(self) -> i8 {
        self.sign()
    }

    pub const fn promotion_row(self) -> i8 {
        match self {
            Self::Red => 7,
            Self::White => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "Red"),
            Self::White => write!(f, "White"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self {
            color,
            rank: Rank::Man,
        }
    }

    pub const fn king(color: Color) -> Self {
        Self {
            color,
            rank: Rank::King,
        }
    }

    pub const fn is_king(self) -> bool {
        matches!(self.rank, Rank::King)
    }

    /// Signed material value: 1 for a man, 1.5 for a king, negative for White.
    pub fn value(self) -> f64 {
        let magnitude = match self.rank {
            Rank::Man => 1.0,
            Rank::King => 1.5,
        };
        magnitude * f64::from(self.color.sign())
    }

    /// Whether the piece may travel along a diagonal whose row delta is `d_row`.
    pub const fn can_travel(self, d_row: i8) -> bool {
        self.is_king() || d_row.signum() == self.color.forward()
    }

    const fn symbol(self) -> char {
        match (self.color, self.rank) {
            (Color::Red, Rank::Man) => 'r',
            (Color::Red, Rank::King) => 'R',
            (Color::White, Rank::Man) => 'w',
            (Color::White, Rank::King) => 'W',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Light square, never holds a piece.
    Unusable,
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Self::Occupied(piece) => Some(piece),
            Self::Unusable | Self::Empty => None,
        }
    }

    const fn symbol(self) -> char {
        match self {
            Self::Unusable => ' ',
            Self::Empty => '.',
            Self::Occupied(piece) => piece.symbol(),
        }
    }
}

/// A (row, col) square. Components are signed so that off-board targets can be
/// named and rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE as i8 && self.col >= 0 && self.col < BOARD_SIZE as i8
    }

    pub const fn is_dark(self) -> bool {
        (self.row as i16 + self.col as i16).rem_euclid(2) == 0
    }

    #[must_use]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self::new(self.row.saturating_add(d_row), self.col.saturating_add(d_col))
    }

    /// Square halfway between `self` and `other`.
    #[must_use]
    pub const fn midpoint(self, other: Self) -> Self {
        Self::new(
            self.row + (other.row - self.row) / 2,
            self.col + (other.col - self.col) / 2,
        )
    }

    #[allow(clippy::cast_sign_loss)]
    const fn index(self) -> Option<(usize, usize)> {
        if self.is_on_board() {
            Some((self.row as usize, self.col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening: Red men on rows 0-2, White men on rows 5-7.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for at in Self::dark_squares() {
            match at.row {
                0..=2 => board.set(at, Cell::Occupied(Piece::man(Color::Red))),
                5..=7 => board.set(at, Cell::Occupied(Piece::man(Color::White))),
                _ => {}
            }
        }
        board
    }

    /// No pieces at all; dark squares empty, light squares unusable.
    #[must_use]
    pub fn empty() -> Self {
        let mut cells = [[Cell::Unusable; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                if (row + col) % 2 == 0 {
                    *cell = Cell::Empty;
                }
            }
        }
        Self { cells }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn dark_squares() -> impl Iterator<Item = Coord> {
        let size = BOARD_SIZE as i8;
        (0..size)
            .flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
            .filter(|at| at.is_dark())
    }

    /// Read-only snapshot of the grid, row 0 first.
    pub const fn get_state(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, at: Coord) -> Option<Cell> {
        let (row, col) = at.index()?;
        self.cells.get(row)?.get(col).copied()
    }

    #[must_use]
    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.cell(at).and_then(Cell::piece)
    }

    fn set(&mut self, at: Coord, cell: Cell) {
        if let Some((row, col)) = at.index() {
            if let Some(slot) = self.cells.get_mut(row).and_then(|line| line.get_mut(col)) {
                *slot = cell;
            }
        }
    }

    /// Puts `piece` on a dark square, replacing whatever was there.
    pub fn place(&mut self, at: Coord, piece: Piece) -> Result<(), IllegalMove> {
        ensure_playable(at)?;
        self.set(at, Cell::Occupied(piece));
        Ok(())
    }

    pub fn clear_square(&mut self, at: Coord) -> Result<Option<Piece>, IllegalMove> {
        ensure_playable(at)?;
        let previous = self.piece_at(at);
        self.set(at, Cell::Empty);
        Ok(previous)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Self::dark_squares().filter_map(|at| self.piece_at(at).map(|piece| (at, piece)))
    }

    #[must_use]
    pub fn count_pieces(&self, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.color == color).count()
    }

    /// Signed sum of piece values, positive when Red is ahead.
    #[must_use]
    pub fn material(&self) -> f64 {
        self.pieces().map(|(_, piece)| piece.value()).sum()
    }

    /// Squares from which `color` can step one square diagonally into an empty square.
    #[must_use]
    pub fn can_move(&self, color: Color) -> DirectionMask {
        self.direction_mask(color, 1, None)
    }

    /// Squares from which `color` can capture by jumping two squares.
    ///
    /// With `from` set only that square's options are kept, which is what a
    /// continuing jump chain asks for.
    #[must_use]
    pub fn can_jump(&self, color: Color, from: Option<Coord>) -> DirectionMask {
        self.direction_mask(color, 2, from)
    }

    fn direction_mask(&self, color: Color, reach: i8, only: Option<Coord>) -> DirectionMask {
        let mut mask = [[[false; BOARD_SIZE]; BOARD_SIZE]; 4];
        for (plane, &(d_row, d_col)) in mask.iter_mut().zip(DIRECTIONS.iter()) {
            for from in Self::dark_squares() {
                if only.is_some_and(|square| square != from) {
                    continue;
                }
                if !self.can_reach(color, from, d_row, d_col, reach) {
                    continue;
                }
                if let Some((row, col)) = from.index() {
                    if let Some(flag) = plane.get_mut(row).and_then(|line| line.get_mut(col)) {
                        *flag = true;
                    }
                }
            }
        }
        mask
    }

    fn can_reach(&self, color: Color, from: Coord, d_row: i8, d_col: i8, reach: i8) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        if piece.color != color || !piece.can_travel(d_row) {
            return false;
        }
        let target = from.offset(d_row * reach, d_col * reach);
        if self.cell(target) != Some(Cell::Empty) {
            return false;
        }
        reach == 1
            || self
                .piece_at(from.offset(d_row, d_col))
                .is_some_and(|jumped| jumped.color != color)
    }

    /// Every simple move for `color` as (from, to) pairs.
    #[must_use]
    pub fn calculate_possible_moves(&self, color: Color) -> Vec<(Coord, Coord)> {
        Self::mask_to_pairs(&self.can_move(color), 1)
    }

    /// Every single capture for `color`, optionally limited to one square.
    #[must_use]
    pub fn calculate_possible_jumps(&self, color: Color, from: Option<Coord>) -> Vec<(Coord, Coord)> {
        Self::mask_to_pairs(&self.can_jump(color, from), 2)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn mask_to_pairs(mask: &DirectionMask, reach: i8) -> Vec<(Coord, Coord)> {
        let mut pairs = Vec::new();
        for (plane, &(d_row, d_col)) in mask.iter().zip(DIRECTIONS.iter()) {
            for (row, line) in plane.iter().enumerate() {
                for (col, &flag) in line.iter().enumerate() {
                    if flag {
                        let from = Coord::new(row as i8, col as i8);
                        pairs.push((from, from.offset(d_row * reach, d_col * reach)));
                    }
                }
            }
        }
        pairs
    }

    #[must_use]
    pub fn has_any_action(&self, color: Color) -> bool {
        !self.calculate_possible_jumps(color, None).is_empty()
            || !self.calculate_possible_moves(color).is_empty()
    }

    /// Steps a piece one square diagonally.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Result<(), IllegalMove> {
        let piece = validate_displacement(self, from, to, 1)?;
        self.set(to, Cell::Occupied(piece));
        self.set(from, Cell::Empty);
        Ok(())
    }

    /// Jumps a piece two squares diagonally and removes the captured piece.
    pub fn jump_piece(&mut self, from: Coord, to: Coord) -> Result<Piece, IllegalMove> {
        let piece = validate_displacement(self, from, to, 2)?;
        let middle = from.midpoint(to);
        let captured = match self.piece_at(middle) {
            Some(jumped) if jumped.color != piece.color => jumped,
            _ => return Err(IllegalMove::NoCapture(middle)),
        };
        self.set(to, Cell::Occupied(piece));
        self.set(middle, Cell::Empty);
        self.set(from, Cell::Empty);
        Ok(captured)
    }

    /// Crowns every man standing on its far row. Returns how many were crowned.
    pub fn promote_pieces(&mut self) -> usize {
        let mut promoted = 0;
        for color in [Color::Red, Color::White] {
            let row = color.promotion_row();
            for at in Self::dark_squares().filter(|at| at.row == row) {
                if self.piece_at(at) == Some(Piece::man(color)) {
                    self.set(at, Cell::Occupied(Piece::king(color)));
                    promoted += 1;
                }
            }
        }
        promoted
    }

    /// The surviving side once the other has no pieces left.
    #[must_use]
    pub fn check_winner(&self) -> Option<Color> {
        if self.count_pieces(Color::Red) == 0 {
            Some(Color::White)
        } else if self.count_pieces(Color::White) == 0 {
            Some(Color::Red)
        } else {
            None
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for (row, line) in self.cells.iter().enumerate().rev() {
            write!(f, "{row}")?;
            for cell in line {
                write!(f, " {}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i8, col: i8) -> Coord {
        Coord::new(row, col)
    }

    fn board_with(pieces: &[(i8, i8, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.place(c(row, col), piece).unwrap();
        }
        board
    }

    fn any(mask: &DirectionMask) -> bool {
        mask.iter().flatten().flatten().any(|&flag| flag)
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert_eq!(board.count_pieces(Color::Red), 12);
        assert_eq!(board.count_pieces(Color::White), 12);
        assert_eq!(board.check_winner(), None);
        assert!(board.pieces().all(|(at, _)| at.is_dark()));
        assert!(board
            .pieces()
            .all(|(at, piece)| (piece.color == Color::Red) == (at.row <= 2)));
        assert_eq!(board.cell(c(0, 1)), Some(Cell::Unusable));
        assert_eq!(board.cell(c(3, 3)), Some(Cell::Empty));
        assert!(board.material().abs() < f64::EPSILON);
    }

    #[test]
    fn test_initial_moves() {
        let board = Board::new();
        // Front row men on (2,0),(2,2),(2,4),(2,6): seven forward steps in total.
        let moves = board.calculate_possible_moves(Color::Red);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|(from, to)| from.row == 2 && to.row == 3));
        let moves = board.calculate_possible_moves(Color::White);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|(from, to)| from.row == 5 && to.row == 4));
        assert!(board.calculate_possible_jumps(Color::Red, None).is_empty());
    }

    #[test]
    fn test_move_pairs_are_direction_major() {
        let board = board_with(&[(3, 3, Piece::king(Color::Red))]);
        let moves = board.calculate_possible_moves(Color::Red);
        assert_eq!(
            moves,
            vec![
                (c(3, 3), c(4, 4)),
                (c(3, 3), c(4, 2)),
                (c(3, 3), c(2, 4)),
                (c(3, 3), c(2, 2)),
            ]
        );
    }

    #[test]
    fn test_single_jump_scenario() {
        let board = board_with(&[
            (3, 3, Piece::man(Color::Red)),
            (4, 4, Piece::man(Color::White)),
        ]);
        let jumps = board.calculate_possible_jumps(Color::Red, None);
        assert_eq!(jumps, vec![(c(3, 3), c(5, 5))]);

        let mut after = board;
        let captured = after.jump_piece(c(3, 3), c(5, 5)).unwrap();
        assert_eq!(captured, Piece::man(Color::White));
        assert_eq!(after.piece_at(c(4, 4)), None);
        assert_eq!(after.piece_at(c(5, 5)), Some(Piece::man(Color::Red)));
        assert_eq!(after.check_winner(), Some(Color::Red));
    }

    #[test]
    fn test_men_only_jump_forward() {
        let board = board_with(&[
            (3, 3, Piece::man(Color::Red)),
            (2, 2, Piece::man(Color::White)),
        ]);
        // White at (2,2) jumping Red at (3,3) would move up the board.
        assert!(board.calculate_possible_jumps(Color::White, None).is_empty());
        assert!(board.calculate_possible_jumps(Color::Red, None).is_empty());

        let mut board = board;
        assert_eq!(
            board.jump_piece(c(2, 2), c(4, 4)),
            Err(IllegalMove::BackwardMove {
                from: c(2, 2),
                to: c(4, 4)
            })
        );
    }

    #[test]
    fn test_kings_jump_backwards() {
        let board = board_with(&[
            (5, 5, Piece::king(Color::Red)),
            (4, 4, Piece::man(Color::White)),
        ]);
        let jumps = board.calculate_possible_jumps(Color::Red, None);
        assert_eq!(jumps, vec![(c(5, 5), c(3, 3))]);
    }

    #[test]
    fn test_jump_blocked_by_edge_or_piece() {
        let board = board_with(&[
            (6, 6, Piece::man(Color::Red)),
            (7, 7, Piece::man(Color::White)),
            (4, 0, Piece::man(Color::Red)),
            (5, 1, Piece::man(Color::White)),
            (6, 2, Piece::man(Color::White)),
        ]);
        assert!(!any(&board.can_jump(Color::Red, None)));
    }

    #[test]
    fn test_can_jump_restricted_to_square() {
        let board = board_with(&[
            (1, 1, Piece::man(Color::Red)),
            (2, 2, Piece::man(Color::White)),
            (3, 5, Piece::man(Color::Red)),
            (4, 4, Piece::man(Color::White)),
        ]);
        assert_eq!(board.calculate_possible_jumps(Color::Red, None).len(), 2);
        assert_eq!(
            board.calculate_possible_jumps(Color::Red, Some(c(3, 5))),
            vec![(c(3, 5), c(5, 3))]
        );
        assert!(board
            .calculate_possible_jumps(Color::Red, Some(c(0, 0)))
            .is_empty());
    }

    #[test]
    fn test_move_piece_rejections() {
        let mut board = board_with(&[
            (2, 2, Piece::man(Color::Red)),
            (3, 3, Piece::man(Color::White)),
            (5, 5, Piece::man(Color::White)),
        ]);
        let before = board;

        assert_eq!(
            board.move_piece(c(2, 2), c(2, 3)),
            Err(IllegalMove::LightSquare(c(2, 3)))
        );
        assert_eq!(
            board.move_piece(c(2, 3), c(3, 4)),
            Err(IllegalMove::LightSquare(c(2, 3)))
        );
        assert_eq!(
            board.move_piece(c(7, 7), c(8, 8)),
            Err(IllegalMove::OffBoard(c(8, 8)))
        );
        assert_eq!(
            board.move_piece(c(0, 0), c(1, 1)),
            Err(IllegalMove::EmptySource(c(0, 0)))
        );
        assert_eq!(
            board.move_piece(c(2, 2), c(3, 3)),
            Err(IllegalMove::OccupiedTarget(c(3, 3)))
        );
        assert_eq!(
            board.move_piece(c(2, 2), c(4, 4)),
            Err(IllegalMove::NotDiagonalStep {
                from: c(2, 2),
                to: c(4, 4)
            })
        );
        assert_eq!(
            board.move_piece(c(5, 5), c(6, 6)),
            Err(IllegalMove::BackwardMove {
                from: c(5, 5),
                to: c(6, 6)
            })
        );
        assert_eq!(board, before);

        board.move_piece(c(2, 2), c(3, 1)).unwrap();
        assert_eq!(board.piece_at(c(3, 1)), Some(Piece::man(Color::Red)));
        assert_eq!(board.cell(c(2, 2)), Some(Cell::Empty));
    }

    #[test]
    fn test_jump_piece_requires_opponent_in_middle() {
        let mut board = board_with(&[
            (2, 2, Piece::man(Color::Red)),
            (3, 3, Piece::man(Color::Red)),
        ]);
        assert_eq!(
            board.jump_piece(c(2, 2), c(4, 4)),
            Err(IllegalMove::NoCapture(c(3, 3)))
        );
        assert_eq!(
            board.jump_piece(c(2, 2), c(4, 5)),
            Err(IllegalMove::LightSquare(c(4, 5)))
        );
        assert_eq!(
            board.jump_piece(c(2, 2), c(3, 1)),
            Err(IllegalMove::NotDiagonalJump {
                from: c(2, 2),
                to: c(3, 1)
            })
        );
        board.clear_square(c(3, 3)).unwrap();
        assert_eq!(
            board.jump_piece(c(2, 2), c(4, 4)),
            Err(IllegalMove::NoCapture(c(3, 3)))
        );
    }

    #[test]
    fn test_place_rejects_light_squares() {
        let mut board = Board::empty();
        assert_eq!(
            board.place(c(0, 1), Piece::man(Color::Red)),
            Err(IllegalMove::LightSquare(c(0, 1)))
        );
        assert_eq!(
            board.place(c(-1, 1), Piece::man(Color::Red)),
            Err(IllegalMove::OffBoard(c(-1, 1)))
        );
        assert_eq!(board.count_pieces(Color::Red), 0);
    }

    #[test]
    fn test_promotion() {
        let mut board = board_with(&[
            (7, 3, Piece::man(Color::Red)),
            (0, 4, Piece::man(Color::White)),
            (0, 0, Piece::man(Color::Red)),
            (7, 7, Piece::man(Color::White)),
        ]);
        assert_eq!(board.promote_pieces(), 2);
        assert_eq!(board.piece_at(c(7, 3)), Some(Piece::king(Color::Red)));
        assert_eq!(board.piece_at(c(0, 4)), Some(Piece::king(Color::White)));
        // Men on their own home row stay men.
        assert_eq!(board.piece_at(c(0, 0)), Some(Piece::man(Color::Red)));
        assert_eq!(board.piece_at(c(7, 7)), Some(Piece::man(Color::White)));

        let once = board;
        assert_eq!(board.promote_pieces(), 0);
        assert_eq!(board, once);

        assert!((Piece::king(Color::Red).value() - 1.5).abs() < f64::EPSILON);
        assert!((Piece::king(Color::White).value() + 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_check_winner() {
        assert_eq!(Board::empty().check_winner(), Some(Color::White));
        let board = board_with(&[(0, 0, Piece::man(Color::Red))]);
        assert_eq!(board.check_winner(), Some(Color::Red));
        let board = board_with(&[(7, 7, Piece::king(Color::White))]);
        assert_eq!(board.check_winner(), Some(Color::White));
        let board = board_with(&[
            (0, 0, Piece::man(Color::Red)),
            (7, 7, Piece::king(Color::White)),
        ]);
        assert_eq!(board.check_winner(), None);
    }

    #[test]
    fn test_blocked_side_has_no_action() {
        let board = board_with(&[
            (6, 0, Piece::man(Color::Red)),
            (7, 1, Piece::man(Color::White)),
        ]);
        // (7,1) is taken and the jump over it would leave the board.
        assert!(!board.has_any_action(Color::Red));
        assert!(board.has_any_action(Color::White));
    }

    #[test]
    fn test_display() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "  0 1 2 3 4 5 6 7");
        assert_eq!(lines[1], "7   w   w   w   w");
        assert_eq!(lines[8], "0 r   r   r   r  ");
    }
}
