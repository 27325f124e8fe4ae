use std::fmt;

/// Side of the board a piece belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Kind of a chess piece, without its color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value in centipawns, also used by move-ordering heuristics.
    #[must_use]
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Parse a FEN piece letter, ignoring case.
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece. Empty cells are represented as `Option<Piece>` with
/// `None` as the tombstone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    #[must_use]
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Material value in centipawns.
    #[inline]
    #[must_use]
    pub fn value(self) -> i32 {
        self.kind.value()
    }

    /// Case-coded FEN letter (uppercase for White).
    #[must_use]
    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parse a case-coded FEN letter.
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    /// Unicode chess glyph for board diagrams.
    #[must_use]
    pub fn to_unicode(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// A square index 0..=63, laid out file + 8 * rank with a1 = 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(u8);

impl Square {
    /// Build from zero-based file (a = 0) and rank (1st rank = 0).
    #[inline]
    #[must_use]
    pub fn new(file: u8, rank: u8) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square(rank * 8 + file)
    }

    /// Build from signed coordinates, `None` when off the board.
    #[must_use]
    pub fn try_new(file: i32, rank: i32) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn from_index(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// This square shifted by the given file/rank deltas, `None` when the
    /// result falls off the board.
    #[must_use]
    pub fn offset(self, file_delta: i32, rank_delta: i32) -> Option<Square> {
        Square::try_new(
            i32::from(self.file()) + file_delta,
            i32::from(self.rank()) + rank_delta,
        )
    }

    #[inline]
    #[must_use]
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    #[must_use]
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Parse algebraic notation ("e4"). `None` for anything out of range,
    /// replacing the out-of-band sentinel the notation layer would otherwise
    /// need.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Square> {
        let mut chars = name.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Square::new(file as u8 - b'a', rank as u8 - b'1'))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

/// Special-move marker assigned at generation time. Generation and
/// application agree on its meaning; it is never re-derived from the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveFlag {
    Normal,
    Capture,
    EnPassant,
    Castling,
    Promotion,
    DoublePawnPush,
}

/// A single move. Equality is structural over all four fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub flag: MoveFlag,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// The invalid placeholder move (`from == to`), used where a search has
    /// no move to report.
    pub const NONE: Move = Move {
        from: Square(0),
        to: Square(0),
        flag: MoveFlag::Normal,
        promotion: None,
    };

    #[inline]
    #[must_use]
    pub fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            flag: MoveFlag::Normal,
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_flag(from: Square, to: Square, flag: MoveFlag) -> Move {
        Move {
            from,
            to,
            flag,
            promotion: None,
        }
    }

    /// A promoting push or capture, fanned out per promotion piece at
    /// generation time.
    #[inline]
    #[must_use]
    pub fn promoting(from: Square, to: Square, kind: PieceKind) -> Move {
        Move {
            from,
            to,
            flag: MoveFlag::Promotion,
            promotion: Some(kind),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.from != self.to
    }

    #[inline]
    #[must_use]
    pub fn is_capture(self) -> bool {
        matches!(self.flag, MoveFlag::Capture | MoveFlag::EnPassant)
    }

    #[inline]
    #[must_use]
    pub fn is_promotion(self) -> bool {
        self.flag == MoveFlag::Promotion
    }

    #[inline]
    #[must_use]
    pub fn is_castling(self) -> bool {
        self.flag == MoveFlag::Castling
    }

    #[inline]
    #[must_use]
    pub fn is_en_passant(self) -> bool {
        self.flag == MoveFlag::EnPassant
    }

    /// Long form used in logs: origin, `x` on captures, destination, and the
    /// promotion letter when promoting ("e7xd8Q").
    #[must_use]
    pub fn long_algebraic(self) -> String {
        let mut out = self.from.to_string();
        if self.is_capture() {
            out.push('x');
        }
        out.push_str(&self.to.to_string());
        if self.is_promotion() {
            match self.promotion {
                Some(PieceKind::Queen) => out.push('Q'),
                Some(PieceKind::Rook) => out.push('R'),
                Some(PieceKind::Bishop) => out.push('B'),
                Some(PieceKind::Knight) => out.push('N'),
                _ => {}
            }
        }
        out
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl fmt::Display for Move {
    /// Short form: origin square followed by destination square ("e2e4").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
