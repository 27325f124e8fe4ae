use std::fmt;

use super::{Color, Square};

/// Castling permissions, tracked independently per color and side.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    #[must_use]
    pub fn all() -> CastlingRights {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    #[must_use]
    pub fn none() -> CastlingRights {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    #[must_use]
    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    #[must_use]
    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.clear_kingside(color);
        self.clear_queenside(color);
    }

    pub fn clear_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }

    pub fn clear_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }

    /// FEN castling field ("KQkq", "-" when no right remains).
    #[must_use]
    pub fn to_fen_field(&self) -> String {
        let mut out = String::new();
        if self.white_kingside {
            out.push('K');
        }
        if self.white_queenside {
            out.push('Q');
        }
        if self.black_kingside {
            out.push('k');
        }
        if self.black_queenside {
            out.push('q');
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    /// Lenient parse: each recognized letter grants a right, anything else
    /// is ignored.
    #[must_use]
    pub fn from_fen_field(field: &str) -> CastlingRights {
        CastlingRights {
            white_kingside: field.contains('K'),
            white_queenside: field.contains('Q'),
            black_kingside: field.contains('k'),
            black_queenside: field.contains('q'),
        }
    }
}

/// Everything about a position that is not piece placement: side to move,
/// castling rights, en-passant target and the two move counters.
///
/// The struct is `Copy`; a plain value snapshot of it (together with the
/// captured piece) is the unit of undo state pushed by
/// [`Board::make_move`](super::Board::make_move).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub side_to_move: Color,
    /// Target square of a capture en passant, set only by a double pawn push.
    pub en_passant: Option<Square>,
    pub castling: CastlingRights,
    /// Halfmoves since the last pawn move or capture, for the 50-move rule.
    pub halfmove_clock: u32,
    /// Incremented after each Black move.
    pub fullmove_number: u32,
}

impl Position {
    #[must_use]
    pub fn new() -> Position {
        Position {
            side_to_move: Color::White,
            en_passant: None,
            castling: CastlingRights::all(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parse the trailing fields of a full FEN string, skipping the piece
    /// placement. Best effort: missing trailing fields keep their current
    /// values and malformed counters are ignored.
    pub fn set_from_fen(&mut self, fen: &str) {
        let mut fields = fen.split_whitespace().skip(1);

        if let Some(side) = fields.next() {
            self.side_to_move = if side == "w" { Color::White } else { Color::Black };
        }
        if let Some(castling) = fields.next() {
            self.castling = CastlingRights::from_fen_field(castling);
        }
        if let Some(ep) = fields.next() {
            self.en_passant = if ep == "-" { None } else { Square::from_name(ep) };
        }
        if let Some(halfmove) = fields.next() {
            if let Ok(value) = halfmove.parse() {
                self.halfmove_clock = value;
            }
        }
        if let Some(fullmove) = fields.next() {
            if let Ok(value) = fullmove.parse() {
                self.fullmove_number = value;
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    /// The space-separated FEN tail: side to move, castling rights,
    /// en-passant target, halfmove clock, fullmove number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        write!(
            f,
            "{} {} {} {} {}",
            side,
            self.castling.to_fen_field(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
