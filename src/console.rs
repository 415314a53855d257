use checkers_core::logic::board::Color;
use checkers_core::logic::game::{Game, GameStatus, LegalMoves, Move};
use checkers_core::player::PlayerKind;
use std::error::Error;
use std::fmt;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(Color),
    Draw,
    Quit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won(color) => write!(f, "{color} wins"),
            Self::Draw => write!(f, "draw"),
            Self::Quit => write!(f, "abandoned"),
        }
    }
}

/// Drives `game` until someone wins, `max_plies` is reached or the human quits.
pub fn run(
    game: &mut Game,
    max_plies: u32,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome, Box<dyn Error>> {
    loop {
        if let GameStatus::Won(winner) = game.status() {
            writeln!(out, "{}", game.board())?;
            return Ok(Outcome::Won(winner));
        }
        if game.state().plies >= max_plies {
            writeln!(out, "{}", game.board())?;
            return Ok(Outcome::Draw);
        }

        writeln!(out, "{}", game.board())?;
        if let Some(last) = game.last_move() {
            writeln!(out, "last move: {last}")?;
        }
        let player = game.get_active_player();
        writeln!(out, "{} to play ({})", game.turn(), player.name())?;

        let mv = match player.kind() {
            PlayerKind::Ai => match game.request_ai_move()? {
                Some(mv) => mv,
                None => return Err(format!("{} has no move to play", game.turn()).into()),
            },
            PlayerKind::Interactive => {
                let legal = game.determine_legal_moves()?;
                match prompt(&legal, input, out)? {
                    Some(mv) => mv,
                    None => return Ok(Outcome::Quit),
                }
            }
        };
        game.play_turn(&mv)?;
    }
}

/// Lists `legal` and reads an index until a valid one is given.
///
/// `q` or end of input yields `None`.
pub fn prompt(
    legal: &LegalMoves,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<Move>, Box<dyn Error>> {
    for (idx, mv) in legal.moves.iter().enumerate() {
        writeln!(out, "  [{idx}] {} {mv}", legal.kind)?;
    }
    let mut line = String::new();
    loop {
        write!(out, "choose a move (q to quit): ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        let picked = answer
            .parse::<usize>()
            .ok()
            .and_then(|idx| legal.moves.get(idx));
        match picked {
            Some(mv) => return Ok(Some(mv.clone())),
            None => writeln!(out, "'{answer}' is not one of the listed moves")?,
        }
    }
}
