//! Turn-taking on top of the board: the [`Player`] attempt-move gate and the
//! [`Game`] controller that alternates sides and recognizes checkmate.
//!
//! The console driver owns the prompt loop; everything here is I/O-free and
//! communicates through return values, so rejected moves can simply be
//! re-prompted and a terminal [`TurnOutcome`] ends the game without any
//! process-control calls inside the library.

use anyhow::bail;
use itertools::Itertools;

use crate::chess::board::Board;
use crate::chess::core::{Colour, Square};

/// One side of the game. Holds nothing but its colour; the board is shared
/// with the opponent and passed in per attempt.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    colour: Colour,
}

impl Player {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(colour: Colour) -> Self {
        Self { colour }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn colour(&self) -> Colour {
        self.colour
    }

    /// Attempts a move on behalf of this player. The move must pass the
    /// board's geometry/occupancy validation and, after being played out on a
    /// scratch copy, must leave this player's own king out of check. Only
    /// then is it committed to the real board.
    ///
    /// Returns `false` (with the board untouched) for any rejected move.
    pub fn attempt_move(&self, board: &mut Board, from: Square, to: Square) -> bool {
        if !board.validate_move(self.colour, from, to) {
            return false;
        }
        let mut scratch = board.clone();
        scratch.commit_move(from, to);
        if scratch.in_check(self.colour) {
            return false;
        }
        board.commit_move(from, to);
        true
    }
}

/// Result of feeding one proposed move to [`Game::advance_turn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The move was illegal; the board is unchanged and the same side is
    /// still to move.
    Rejected,
    /// The move was played; the game goes on with the other side to move.
    Continue,
    /// The move was played and delivered checkmate.
    WhiteWins,
    /// The move was played and delivered checkmate.
    BlackWins,
}

/// Turn controller: owns the board and both players, alternates sides and
/// declares the winner on checkmate.
#[derive(Debug)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    side_to_move: Colour,
}

impl Game {
    /// Fresh game from the standard starting position, White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_position(Board::starting(), Colour::White)
    }

    /// Game continuing from an arbitrary position. Useful for tests and
    /// problem setups.
    #[must_use]
    pub const fn with_position(board: Board, side_to_move: Colour) -> Self {
        Self {
            board,
            players: [Player::new(Colour::White), Player::new(Colour::Black)],
            side_to_move,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    /// Whether the side to move is currently in check. Drivers use this for
    /// the "Check!" notice after rendering the board.
    #[must_use]
    pub fn is_check(&self) -> bool {
        self.board.in_check(self.side_to_move)
    }

    /// Plays one proposed move for the side to move.
    ///
    /// An illegal move returns [`TurnOutcome::Rejected`] and changes nothing,
    /// so the driver can re-prompt. A legal move is committed; if it leaves
    /// the opponent checkmated the mover's win is returned and the game is
    /// over, otherwise the turn passes to the opponent.
    pub fn advance_turn(&mut self, from: Square, to: Square) -> TurnOutcome {
        let mover = match self.side_to_move {
            Colour::White => self.players[0],
            Colour::Black => self.players[1],
        };
        debug_assert!(mover.colour() == self.side_to_move);
        if !mover.attempt_move(&mut self.board, from, to) {
            return TurnOutcome::Rejected;
        }
        let opponent = self.side_to_move.opponent();
        if self.board.in_check(opponent) && !self.board.has_any_legal_move(opponent) {
            return match self.side_to_move {
                Colour::White => TurnOutcome::WhiteWins,
                Colour::Black => TurnOutcome::BlackWins,
            };
        }
        self.side_to_move = opponent;
        TurnOutcome::Continue
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses one line of user input into an (origin, destination) pair. Accepts
/// two algebraic squares separated by whitespace (`e2 e4`) or glued together
/// (`e2e4`).
///
/// # Errors
///
/// Returns an error describing the malformed part of the input; the board is
/// never involved, so the caller just re-prompts.
pub fn parse_move(input: &str) -> anyhow::Result<(Square, Square)> {
    let input = input.trim();
    if let Some((from, to)) = input.split_whitespace().collect_tuple() {
        return Ok((Square::try_from(from)?, Square::try_from(to)?));
    }
    if input.len() == 4 && input.is_char_boundary(2) {
        let (from, to) = input.split_at(2);
        return Ok((Square::try_from(from)?, Square::try_from(to)?));
    }
    bail!("expected a move like 'e2 e4' or 'e2e4', got '{input}'")
}
