use super::{Board, Color, PieceKind, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONAL_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const STRAIGHT_DIRS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

impl Board {
    /// Locate the king of `color`. `None` when it is absent, which every
    /// check query treats as "not in check" rather than an error.
    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            self.piece_at(sq)
                .is_some_and(|p| p.kind == PieceKind::King && p.color == color)
        })
    }

    /// Whether any piece of `by_color` attacks `sq`. Scans outward from the
    /// target along every attack shape, stopping sliding rays at the first
    /// occupied square. This is the dominant cost of check detection and runs
    /// once per candidate move.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by_color: Color) -> bool {
        // Pawn capture diagonals, relative to the attacker's push direction.
        let pawn_dir = match by_color {
            Color::White => 1,
            Color::Black => -1,
        };
        for df in [-1, 1] {
            if let Some(from) = sq.offset(df, -pawn_dir) {
                if self
                    .piece_at(from)
                    .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == by_color)
                {
                    return true;
                }
            }
        }

        for (df, dr) in KNIGHT_OFFSETS {
            if let Some(from) = sq.offset(df, dr) {
                if self
                    .piece_at(from)
                    .is_some_and(|p| p.kind == PieceKind::Knight && p.color == by_color)
                {
                    return true;
                }
            }
        }

        if self.ray_attacked(sq, by_color, &DIAGONAL_DIRS, PieceKind::Bishop) {
            return true;
        }
        if self.ray_attacked(sq, by_color, &STRAIGHT_DIRS, PieceKind::Rook) {
            return true;
        }

        for (df, dr) in KING_OFFSETS {
            if let Some(from) = sq.offset(df, dr) {
                if self
                    .piece_at(from)
                    .is_some_and(|p| p.kind == PieceKind::King && p.color == by_color)
                {
                    return true;
                }
            }
        }

        false
    }

    /// Walk each direction until blocked; the blocker attacks if it is a
    /// queen or the given slider kind of the attacking color.
    fn ray_attacked(
        &self,
        sq: Square,
        by_color: Color,
        dirs: &[(i32, i32); 4],
        slider: PieceKind,
    ) -> bool {
        for &(df, dr) in dirs {
            let mut step = 1;
            while let Some(from) = sq.offset(df * step, dr * step) {
                if let Some(piece) = self.piece_at(from) {
                    if piece.color == by_color
                        && (piece.kind == slider || piece.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                step += 1;
            }
        }
        false
    }

    /// Whether `color`'s king is currently attacked. A missing king is not
    /// in check.
    #[must_use]
    pub fn is_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opposite()),
            None => false,
        }
    }
}
