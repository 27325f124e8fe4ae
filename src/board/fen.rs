use std::fmt;
use std::str::FromStr;

use super::{Board, CastlingRights, Color, Piece, Position, Square};

/// Error type for validated FEN parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has fewer than the four mandatory fields.
    TooFewFields { found: usize },
    /// More than eight ranks in the placement field.
    TooManyRanks,
    /// A rank overflows past the h-file.
    TooManyFiles { rank: usize },
    /// Unrecognized character in the placement field.
    InvalidPiece { ch: char },
    /// Side-to-move field is neither "w" nor "b".
    InvalidSideToMove { found: String },
    /// Unrecognized character in the castling field.
    InvalidCastling { ch: char },
    /// En-passant field is neither "-" nor a square name.
    InvalidEnPassant { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::TooManyRanks => write!(f, "FEN placement has more than 8 ranks"),
            FenError::TooManyFiles { rank } => {
                write!(f, "too many files in FEN rank {rank}")
            }
            FenError::InvalidPiece { ch } => write!(f, "invalid piece character '{ch}' in FEN"),
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { ch } => {
                write!(f, "invalid castling character '{ch}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

impl Board {
    /// Load a position from FEN, best effort.
    ///
    /// Unrecognized placement characters contribute no piece, missing
    /// optional trailing fields retain their defaults, and malformed
    /// counters are ignored. Use [`Board::try_from_fen`] when malformed
    /// input should be reported instead. Clears the undo stack.
    pub fn set_from_fen(&mut self, fen: &str) {
        self.squares = [None; 64];
        self.history.clear();
        self.position = Position::new();

        let Some(placement) = fen.split_whitespace().next() else {
            return;
        };

        let mut rank: i32 = 7;
        let mut file: i32 = 0;
        for c in placement.chars() {
            if c == '/' {
                rank -= 1;
                file = 0;
            } else if let Some(count) = c.to_digit(10) {
                file += count as i32;
            } else {
                if let (Some(piece), Some(sq)) = (Piece::from_char(c), Square::try_new(file, rank))
                {
                    self.set_piece(sq, piece);
                }
                file += 1;
            }
        }

        self.position.set_from_fen(fen);
    }

    /// Load a position from FEN, best effort. See [`Board::set_from_fen`].
    #[must_use]
    pub fn from_fen(fen: &str) -> Board {
        let mut board = Board::empty();
        board.set_from_fen(fen);
        board
    }

    /// Parse FEN, reporting the first structural problem instead of
    /// papering over it.
    pub fn try_from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::TooFewFields { found: fields.len() });
        }

        let mut board = Board::empty();

        for (rank_idx, rank_str) in fields[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::TooManyRanks);
            }
            let rank = 7 - rank_idx as i32;
            let mut file: i32 = 0;
            for c in rank_str.chars() {
                if let Some(count) = c.to_digit(10) {
                    file += count as i32;
                } else {
                    let piece =
                        Piece::from_char(c).ok_or(FenError::InvalidPiece { ch: c })?;
                    let sq = Square::try_new(file, rank)
                        .ok_or(FenError::TooManyFiles { rank: rank_idx })?;
                    board.set_piece(sq, piece);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::TooManyFiles { rank: rank_idx });
            }
        }

        board.position.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        for c in fields[2].chars() {
            match c {
                'K' => castling.white_kingside = true,
                'Q' => castling.white_queenside = true,
                'k' => castling.black_kingside = true,
                'q' => castling.black_queenside = true,
                '-' => {}
                _ => return Err(FenError::InvalidCastling { ch: c }),
            }
        }
        board.position.castling = castling;

        board.position.en_passant = if fields[3] == "-" {
            None
        } else {
            Some(Square::from_name(fields[3]).ok_or_else(|| FenError::InvalidEnPassant {
                found: fields[3].to_string(),
            })?)
        };

        if let Some(halfmove) = fields.get(4) {
            board.position.halfmove_clock = halfmove.parse().unwrap_or(0);
        }
        if let Some(fullmove) = fields.get(5) {
            board.position.fullmove_number = fullmove.parse().unwrap_or(1);
        }

        Ok(board)
    }

    /// Serialize to FEN. Round-trips losslessly through
    /// [`Board::set_from_fen`] for every field the board owns.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        format!("{} {}", placement, self.position)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
