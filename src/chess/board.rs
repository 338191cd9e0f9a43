//! The chessboard: an 8×8 grid of occupancy flags plus a map from occupied
//! squares to the pieces standing on them. All move validation, check
//! detection and the "any move out of check" search used to call checkmate
//! live here.
//!
//! The board is a plain value: deep-copying it with [`Clone`] produces a
//! fully independent scratch board, which is how hypothetical moves are tried
//! without ever touching real game state.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use anyhow::bail;
use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::core::{
    Colour,
    File,
    Piece,
    PieceKind,
    Rank,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};

/// Piece placement of the standard starting position, in FEN.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Maximum number of squares strictly between two squares on one line.
const MAX_LINE_GAP: usize = BOARD_WIDTH as usize - 2;

/// Squares strictly between `from` and `to` along their shared line. Both
/// endpoints are excluded. The caller guarantees the squares are aligned on a
/// rank, file or diagonal.
fn line_between(from: Square, to: Square) -> ArrayVec<Square, MAX_LINE_GAP> {
    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;
    debug_assert!(
        file_delta == 0 || rank_delta == 0 || file_delta.abs() == rank_delta.abs(),
        "line_between requires aligned squares, got {from} and {to}"
    );
    let (file_step, rank_step) = (file_delta.signum(), rank_delta.signum());
    let mut squares = ArrayVec::new();
    let mut current = from.offset(file_step, rank_step);
    while let Some(square) = current {
        if square == to {
            break;
        }
        squares.push(square);
        current = square.offset(file_step, rank_step);
    }
    squares
}

/// Full board state: which squares are occupied and by which pieces.
///
/// Two structures are maintained in lockstep: the occupancy grid (one flag
/// per square) and the piece map keyed by square. Occupied squares and map
/// keys are always in bijection; every mutation goes through
/// [`Board::commit_move`] which updates both together.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: [bool; BOARD_SIZE as usize],
    pieces: BTreeMap<Square, Piece>,
}

impl Board {
    /// Creates the starting position of the standard game.
    ///
    /// ```
    /// use patzer::chess::board::Board;
    ///
    /// let board = Board::starting();
    /// assert_eq!(
    ///     board.fen(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self::from_fen(STARTING_PLACEMENT).expect("the starting placement is valid")
    }

    /// Parses the piece placement field of [Forsyth-Edwards Notation]. Only
    /// the placement is modeled here: this engine has no castling, en passant
    /// or clock state, so any further whitespace-separated FEN fields are
    /// accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed placement strings and for placements
    /// that do not have exactly one king per side.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let placement = match input.trim().split_whitespace().next() {
            Some(placement) => placement,
            None => bail!("incorrect FEN: missing pieces placement"),
        };
        let mut board = Self {
            grid: [false; BOARD_SIZE as usize],
            pieces: BTreeMap::new(),
        };
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in placement.split('/') {
            if rank_id == 0 {
                bail!("incorrect FEN: expected 8 ranks, got {placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file >= BOARD_WIDTH {
                    bail!("incorrect FEN: rank {rank_fen} exceeds {BOARD_WIDTH} files");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                let square = Square::new(file.try_into()?, rank);
                board.grid[square as usize] = true;
                let _ = board.pieces.insert(square, piece);
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of length {file}"
                );
            }
        }
        if rank_id != 0 {
            bail!("incorrect FEN: there should be 8 ranks, got {placement}");
        }
        for colour in [Colour::White, Colour::Black] {
            let kings = board
                .pieces
                .values()
                .filter(|piece| piece.kind == PieceKind::King && piece.colour == colour)
                .count();
            if kings != 1 {
                bail!("expected 1 {colour} king, got {kings}");
            }
        }
        Ok(board)
    }

    /// Serializes the piece placement in FEN.
    #[must_use]
    pub fn fen(&self) -> String {
        let mut result = String::new();
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0;
            for file in File::iter() {
                match self.pieces.get(&Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_squares > 0 {
                            result.push_str(&empty_squares.to_string());
                            empty_squares = 0;
                        }
                        result.push_str(&piece.to_string());
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares > 0 {
                result.push_str(&empty_squares.to_string());
            }
            if rank != Rank::One {
                result.push('/');
            }
        }
        result
    }

    /// Whether the square currently holds a piece.
    #[must_use]
    pub const fn is_occupied(&self, square: Square) -> bool {
        self.grid[square as usize]
    }

    /// The piece standing on the square, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.get(&square)
    }

    /// Number of live pieces on the board.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Decides whether moving from `from` to `to` is legal on this board for
    /// the given side: the origin must hold one of the side's pieces, the
    /// destination must not hold another one, the piece's movement geometry
    /// must allow the step, and for sliding pieces (and the pawn's two-square
    /// advance) every square strictly in between must be empty.
    ///
    /// This is purely a geometry and occupancy gate. It deliberately does
    /// *not* ask whether the move leaves the mover's own king in check; that
    /// second, independent gate is layered on by the caller through
    /// scratch-board simulation.
    #[must_use]
    pub fn validate_move(&self, colour: Colour, from: Square, to: Square) -> bool {
        let piece = match self.pieces.get(&from) {
            Some(piece) if piece.colour == colour => piece,
            _ => return false,
        };
        if let Some(target) = self.pieces.get(&to) {
            if target.colour == colour {
                return false;
            }
        }
        if !piece.is_valid_movement(from, to, self.is_occupied(to)) {
            return false;
        }
        match piece.kind {
            // Knights jump; kings only ever step one square.
            PieceKind::King | PieceKind::Knight => true,
            // The pawn only has intermediate squares on its two-square
            // advance; single steps and captures pass trivially.
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Pawn => {
                self.is_path_clear(from, to)
            },
        }
    }

    fn is_path_clear(&self, from: Square, to: Square) -> bool {
        line_between(from, to)
            .iter()
            .all(|&square| !self.is_occupied(square))
    }

    /// Commits a previously validated move: relocates the piece from `from`
    /// to `to`, removing any captured piece, and updates the occupancy grid
    /// and piece map atomically.
    ///
    /// There are no validity checks here. Committing a move that was not
    /// validated corrupts the board; this is a programming error, not a
    /// recoverable condition.
    pub fn commit_move(&mut self, from: Square, to: Square) {
        let piece = self
            .pieces
            .remove(&from)
            .expect("commit_move requires an occupied origin square");
        // A capture simply replaces the destination map entry.
        let _ = self.pieces.insert(to, piece);
        self.grid[from as usize] = false;
        self.grid[to as usize] = true;
        debug_assert!(self.is_consistent());
    }

    /// Occupied grid squares and piece map keys must be in bijection.
    fn is_consistent(&self) -> bool {
        Square::iter().all(|square| self.grid[square as usize] == self.pieces.contains_key(&square))
    }

    /// Locates the king of the given colour.
    ///
    /// # Panics
    ///
    /// Panics if the king is missing: boards always hold exactly one king per
    /// side, so this is an internal-consistency failure, never a user-facing
    /// error.
    #[must_use]
    pub fn king_square(&self, colour: Colour) -> Square {
        self.pieces
            .iter()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.colour == colour)
            .map(|(square, _)| *square)
            .expect("exactly one king per side is a board invariant")
    }

    /// Whether the king of `colour` standing on `king_square` is attacked:
    /// true when any opposing piece has a valid board move onto the king's
    /// square.
    #[must_use]
    pub fn is_king_in_check(&self, king_square: Square, colour: Colour) -> bool {
        self.pieces.iter().any(|(&square, piece)| {
            piece.colour != colour && self.validate_move(piece.colour, square, king_square)
        })
    }

    /// Convenience form of [`Board::is_king_in_check`] that locates the king
    /// first.
    #[must_use]
    pub fn in_check(&self, colour: Colour) -> bool {
        self.is_king_in_check(self.king_square(colour), colour)
    }

    /// Decides whether the side whose king is in check has any move that
    /// resolves the check: capturing the threatening piece, interposing on
    /// its line of attack, or moving the king. Returns `false` exactly when
    /// the position is checkmate.
    ///
    /// The search tries non-king piece moves (captures and blocks) before
    /// king moves, short-circuiting on the first resolving move. Each
    /// candidate is validated, then played out on a scratch copy of the board
    /// and accepted only if the king is safe afterwards.
    ///
    /// Interposition squares are enumerated only when there is a single
    /// threat and it is a sliding piece. Under double check this means only
    /// direct captures of either checker and king moves are tried; a move
    /// blocking both lines at once (which can not exist in legal chess) is
    /// never needed.
    #[must_use]
    pub fn has_any_legal_move(&self, colour: Colour) -> bool {
        let king = self.king_square(colour);
        // Opposing squares with a valid move onto the king, later widened
        // with interposition squares. Sized for the worst case `from_fen`
        // accepts (any non-king square may hold a piece), not for legal
        // games.
        let mut threat_squares: ArrayVec<Square, { BOARD_SIZE as usize }> = ArrayVec::new();
        // Squares of the checked side's non-king pieces.
        let mut team_squares: ArrayVec<Square, { BOARD_SIZE as usize }> = ArrayVec::new();
        for (&square, piece) in &self.pieces {
            if piece.colour != colour {
                if self.validate_move(piece.colour, square, king) {
                    threat_squares.push(square);
                }
            } else if piece.kind != PieceKind::King {
                team_squares.push(square);
            }
        }
        debug_assert!(
            !threat_squares.is_empty(),
            "has_any_legal_move is only meaningful for a side in check"
        );
        if threat_squares.is_empty() {
            return true;
        }
        if threat_squares.len() == 1 {
            let threat = threat_squares[0];
            if self.pieces[&threat].kind.is_sliding() {
                threat_squares.extend(line_between(threat, king));
            }
        }
        for &from in &team_squares {
            for &to in &threat_squares {
                if self.resolves_check(colour, from, to) {
                    return true;
                }
            }
        }
        for (file_delta, rank_delta) in itertools::iproduct!(-1_i8..=1, -1_i8..=1) {
            if (file_delta, rank_delta) == (0, 0) {
                continue;
            }
            if let Some(to) = king.offset(file_delta, rank_delta) {
                if self.resolves_check(colour, king, to) {
                    return true;
                }
            }
        }
        false
    }

    /// Validates the move, plays it out on a scratch copy and reports whether
    /// the mover's king ends up safe. The real board is never touched.
    fn resolves_check(&self, colour: Colour, from: Square, to: Square) -> bool {
        if !self.validate_move(colour, from, to) {
            return false;
        }
        let mut scratch = self.clone();
        scratch.commit_move(from, to);
        !scratch.in_check(colour)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Board {
    /// Renders the board as a labeled 8×8 grid with piece glyphs (uppercase
    /// for White, lowercase for Black) and '.' for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in Rank::iter().rev() {
            write!(f, "{rank} ")?;
            for file in File::iter() {
                match self.pieces.get(&Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}")?,
                    None => f.write_char('.')?,
                }
                if file != File::H {
                    f.write_char(' ')?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the piece map: one `square: piece` line per entry, in key order.
    /// Handy for inspecting the board/map bijection directly.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (square, piece) in &self.pieces {
            writeln!(f, "{square}: {piece}")?;
        }
        Ok(())
    }
}
