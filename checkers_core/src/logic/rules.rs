use crate::logic::board::{Board, Coord, Piece};
use std::fmt;

/// Every way a requested move, jump or placement can break the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    OffBoard(Coord),
    LightSquare(Coord),
    NotDiagonalStep { from: Coord, to: Coord },
    NotDiagonalJump { from: Coord, to: Coord },
    EmptySource(Coord),
    OccupiedTarget(Coord),
    BackwardMove { from: Coord, to: Coord },
    NoCapture(Coord),
    NotYourPiece(Coord),
    /// A plain step was offered while a capture is available.
    CaptureRequired(Coord),
    /// The chain stops on a square from which another capture is possible.
    IncompleteChain(Coord),
    MalformedChain,
    GameOver,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffBoard(at) => write!(f, "square {at} is outside the board"),
            Self::LightSquare(at) => {
                write!(f, "square {at} is a light square, pieces only use dark squares")
            }
            Self::NotDiagonalStep { from, to } => {
                write!(f, "{from} -> {to} is not a single diagonal step")
            }
            Self::NotDiagonalJump { from, to } => {
                write!(f, "{from} -> {to} is not a two-square diagonal jump")
            }
            Self::EmptySource(at) => write!(f, "there is no piece to move on {at}"),
            Self::OccupiedTarget(at) => write!(f, "square {at} is already occupied"),
            Self::BackwardMove { from, to } => {
                write!(f, "{from} -> {to} moves backwards, only kings may do that")
            }
            Self::NoCapture(at) => write!(f, "no opponent piece to capture on {at}"),
            Self::NotYourPiece(at) => write!(f, "the piece on {at} belongs to the opponent"),
            Self::CaptureRequired(at) => {
                write!(f, "cannot step from {at} while a capture is available")
            }
            Self::IncompleteChain(at) => write!(f, "the jump chain must continue from {at}"),
            Self::MalformedChain => write!(f, "a jump chain needs a start and at least one landing"),
            Self::GameOver => write!(f, "the game is already decided"),
        }
    }
}

impl std::error::Error for IllegalMove {}

/// Rejects squares that can never hold a piece.
pub const fn ensure_playable(at: Coord) -> Result<(), IllegalMove> {
    if !at.is_on_board() {
        return Err(IllegalMove::OffBoard(at));
    }
    if !at.is_dark() {
        return Err(IllegalMove::LightSquare(at));
    }
    Ok(())
}

/// Checks a diagonal displacement of `distance` squares and returns the moving piece.
///
/// Covers placement, bounds, geometry, occupancy and the forward-only rule for
/// men. Whether a jump actually captures something is left to the caller.
pub fn validate_displacement(
    board: &Board,
    from: Coord,
    to: Coord,
    distance: i8,
) -> Result<Piece, IllegalMove> {
    ensure_playable(from)?;
    ensure_playable(to)?;

    let d_row = to.row - from.row;
    let d_col = to.col - from.col;
    if d_row.abs() != distance || d_col.abs() != distance {
        return Err(if distance == 1 {
            IllegalMove::NotDiagonalStep { from, to }
        } else {
            IllegalMove::NotDiagonalJump { from, to }
        });
    }

    let piece = board.piece_at(from).ok_or(IllegalMove::EmptySource(from))?;
    if board.piece_at(to).is_some() {
        return Err(IllegalMove::OccupiedTarget(to));
    }
    if !piece.can_travel(d_row) {
        return Err(IllegalMove::BackwardMove { from, to });
    }

    Ok(piece)
}
