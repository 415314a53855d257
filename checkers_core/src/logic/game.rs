use crate::logic::board::{Board, Color, Coord};
use crate::logic::chain::JumpChainBuilder;
use crate::logic::rules::IllegalMove;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Step,
    Jump,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step => write!(f, "move"),
            Self::Jump => write!(f, "jump"),
        }
    }
}

/// A full turn for one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// One diagonal square, no capture.
    Step { from: Coord, to: Coord },
    /// `[start, landing1, landing2, ...]`, every hop a capture.
    Jump(Vec<Coord>),
}

impl Move {
    pub const fn kind(&self) -> MoveKind {
        match self {
            Self::Step { .. } => MoveKind::Step,
            Self::Jump(_) => MoveKind::Jump,
        }
    }

    pub fn origin(&self) -> Option<Coord> {
        match self {
            Self::Step { from, .. } => Some(*from),
            Self::Jump(path) => path.first().copied(),
        }
    }

    pub fn destination(&self) -> Option<Coord> {
        match self {
            Self::Step { to, .. } => Some(*to),
            Self::Jump(path) => path.last().copied(),
        }
    }

    /// Every square the piece visits, starting square included.
    pub fn path(&self) -> Vec<Coord> {
        match self {
            Self::Step { from, to } => vec![*from, *to],
            Self::Jump(path) => path.clone(),
        }
    }

    pub fn captures(&self) -> usize {
        match self {
            Self::Step { .. } => 0,
            Self::Jump(path) => path.len().saturating_sub(1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.kind() {
            MoveKind::Step => " -> ",
            MoveKind::Jump => " x ",
        };
        for (i, square) in self.path().iter().enumerate() {
            if i > 0 {
                write!(f, "{sep}")?;
            }
            write!(f, "{square}")?;
        }
        Ok(())
    }
}

/// The moves open to the side to move. Never mixes steps and jumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves {
    pub kind: MoveKind,
    pub moves: Vec<Move>,
}

impl LegalMoves {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Color),
}

impl GameStatus {
    /// 0 while playing, otherwise the winner's sign.
    pub const fn winner_sign(self) -> i8 {
        match self {
            Self::Playing => 0,
            Self::Won(color) => color.sign(),
        }
    }
}

/// Board and turn. This is the unit search copies before trying a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub plies: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Color::Red,
            status: GameStatus::Playing,
            plies: 0,
        }
    }

    /// Starts from an arbitrary position with `turn` to move.
    #[must_use]
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut state = Self {
            board,
            turn,
            status: GameStatus::Playing,
            plies: 0,
        };
        state.update_status();
        state
    }

    /// Jump chains when any capture exists, plain steps otherwise.
    pub fn determine_legal_moves(&self) -> Result<LegalMoves, IllegalMove> {
        let jumps = self.board.calculate_possible_jumps(self.turn, None);
        if jumps.is_empty() {
            let moves = self
                .board
                .calculate_possible_moves(self.turn)
                .into_iter()
                .map(|(from, to)| Move::Step { from, to })
                .collect();
            return Ok(LegalMoves {
                kind: MoveKind::Step,
                moves,
            });
        }

        let chains = JumpChainBuilder::new(self.turn).build(&self.board, &jumps)?;
        Ok(LegalMoves {
            kind: MoveKind::Jump,
            moves: chains.into_iter().map(Move::Jump).collect(),
        })
    }

    /// Applies `mv` for the side to move, crowns, and hands the turn over.
    ///
    /// Only moves [`Self::determine_legal_moves`] would offer are accepted: a
    /// step is refused while a capture exists and a chain must be maximal. The
    /// board is only touched if the whole move is legal.
    pub fn play_turn(&mut self, mv: &Move) -> Result<GameStatus, IllegalMove> {
        if self.status != GameStatus::Playing {
            return Err(IllegalMove::GameOver);
        }

        let origin = mv.origin().ok_or(IllegalMove::MalformedChain)?;
        if let Some(piece) = self.board.piece_at(origin) {
            if piece.color != self.turn {
                return Err(IllegalMove::NotYourPiece(origin));
            }
        }

        let mut next_board = self.board;
        match mv {
            Move::Step { from, to } => {
                next_board.move_piece(*from, *to)?;
                if !self.board.calculate_possible_jumps(self.turn, None).is_empty() {
                    return Err(IllegalMove::CaptureRequired(*from));
                }
            }
            Move::Jump(path) => {
                if path.len() < 2 {
                    return Err(IllegalMove::MalformedChain);
                }
                for hop in path.windows(2) {
                    if let [from, to] = hop {
                        next_board.jump_piece(*from, *to)?;
                    }
                }
                // Chains must be maximal. Crowning only happens once the chain ends.
                let landing = mv.destination().unwrap_or(origin);
                if !next_board
                    .calculate_possible_jumps(self.turn, Some(landing))
                    .is_empty()
                {
                    return Err(IllegalMove::IncompleteChain(landing));
                }
            }
        }
        next_board.promote_pieces();

        self.board = next_board;
        self.turn = self.turn.opposite();
        self.plies += 1;
        self.update_status();

        Ok(self.status)
    }

    fn update_status(&mut self) {
        if let Some(winner) = self.board.check_winner() {
            self.status = GameStatus::Won(winner);
        } else if !self.board.has_any_action(self.turn) {
            // A side that cannot move loses.
            self.status = GameStatus::Won(self.turn.opposite());
        } else {
            self.status = GameStatus::Playing;
        }
    }
}

/// A match: the shared state plus who plays each color.
pub struct Game {
    state: GameState,
    players: [Box<dyn Player>; 2],
    last_move: Option<Move>,
}

impl Game {
    pub fn new(red: Box<dyn Player>, white: Box<dyn Player>) -> Self {
        Self::from_state(GameState::new(), red, white)
    }

    pub fn from_state(state: GameState, red: Box<dyn Player>, white: Box<dyn Player>) -> Self {
        Self {
            state,
            players: [red, white],
            last_move: None,
        }
    }

    pub const fn state(&self) -> &GameState {
        &self.state
    }

    pub const fn board(&self) -> &Board {
        &self.state.board
    }

    pub const fn turn(&self) -> Color {
        self.state.turn
    }

    pub const fn status(&self) -> GameStatus {
        self.state.status
    }

    pub const fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    pub fn get_active_player(&self) -> &dyn Player {
        match self.state.turn {
            Color::Red => self.players[0].as_ref(),
            Color::White => self.players[1].as_ref(),
        }
    }

    fn active_player_mut(&mut self) -> &mut dyn Player {
        match self.state.turn {
            Color::Red => self.players[0].as_mut(),
            Color::White => self.players[1].as_mut(),
        }
    }

    pub fn determine_legal_moves(&self) -> Result<LegalMoves, IllegalMove> {
        self.state.determine_legal_moves()
    }

    pub fn play_turn(&mut self, mv: &Move) -> Result<GameStatus, IllegalMove> {
        let mover = self.state.turn;
        let status = self.state.play_turn(mv)?;
        log::debug!("{mover} played {mv} ({} plies)", self.state.plies);
        if let GameStatus::Won(winner) = status {
            log::info!("{winner} wins after {} plies", self.state.plies);
        }
        self.last_move = Some(mv.clone());
        Ok(status)
    }

    /// Asks the active player for a move without playing it.
    ///
    /// `Ok(None)` means the player is interactive or found nothing to play.
    pub fn request_ai_move(&mut self) -> Result<Option<Move>, IllegalMove> {
        if self.state.status != GameStatus::Playing {
            return Ok(None);
        }
        let state = self.state.clone();
        let player = self.active_player_mut();
        let mv = player.determine_move(&state)?;
        if mv.is_none() && player.kind() == crate::player::PlayerKind::Ai {
            log::warn!("{} found no move for {}", player.name(), state.turn);
        }
        Ok(mv)
    }
}
