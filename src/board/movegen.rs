use super::{Board, Color, Move, MoveFlag, MoveValidator, Piece, PieceKind, Square};

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

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Produces pseudo-legal moves per piece and filters them down to legal
/// moves through [`MoveValidator`]. Legality by speculative application is
/// deliberately simple rather than incremental; on a 64-cell board it is the
/// correct-by-construction tradeoff.
pub struct MoveGenerator<'a> {
    board: &'a Board,
}

impl<'a> MoveGenerator<'a> {
    #[must_use]
    pub fn new(board: &'a Board) -> MoveGenerator<'a> {
        MoveGenerator { board }
    }

    /// All legal moves for `color`: pseudo-legal generation followed by a
    /// king-safety filter.
    #[must_use]
    pub fn generate_legal_moves(&self, color: Color) -> Vec<Move> {
        let validator = MoveValidator::new(self.board);
        self.generate_pseudo_legal(color)
            .into_iter()
            .filter(|&m| !validator.leaves_king_in_check(m, color))
            .collect()
    }

    /// The legal moves whose flag marks a capture, including en passant.
    /// Consumed by quiescence search.
    #[must_use]
    pub fn generate_captures(&self, color: Color) -> Vec<Move> {
        self.generate_legal_moves(color)
            .into_iter()
            .filter(|m| m.is_capture())
            .collect()
    }

    fn generate_pseudo_legal(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for sq in Square::all() {
            let Some(piece) = self.board.piece_at(sq) else {
                continue;
            };
            if piece.color != color {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => self.pawn_moves(sq, color, &mut moves),
                PieceKind::Knight => self.leaper_moves(sq, color, &KNIGHT_OFFSETS, &mut moves),
                PieceKind::Bishop => self.slider_moves(sq, color, &DIAGONAL_DIRS, &mut moves),
                PieceKind::Rook => self.slider_moves(sq, color, &STRAIGHT_DIRS, &mut moves),
                PieceKind::Queen => {
                    self.slider_moves(sq, color, &DIAGONAL_DIRS, &mut moves);
                    self.slider_moves(sq, color, &STRAIGHT_DIRS, &mut moves);
                }
                PieceKind::King => self.king_moves(sq, color, &mut moves),
            }
        }
        moves
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        let direction: i32 = match color {
            Color::White => 1,
            Color::Black => -1,
        };
        let start_rank = match color {
            Color::White => 1,
            Color::Black => 6,
        };
        let promotion_rank = match color {
            Color::White => 7,
            Color::Black => 0,
        };

        // Single push, fanning out into the four promotion moves on the last
        // rank, plus the double push from the start rank.
        if let Some(to) = from.offset(0, direction) {
            if self.board.piece_at(to).is_none() {
                if i32::from(to.rank()) == promotion_rank {
                    for kind in PROMOTION_KINDS {
                        moves.push(Move::promoting(from, to, kind));
                    }
                } else {
                    moves.push(Move::new(from, to));
                }

                if i32::from(from.rank()) == start_rank {
                    if let Some(double_to) = from.offset(0, 2 * direction) {
                        if self.board.piece_at(double_to).is_none() {
                            moves.push(Move::with_flag(from, double_to, MoveFlag::DoublePawnPush));
                        }
                    }
                }
            }
        }

        // Diagonal captures, onto enemy pieces or the active en-passant
        // square.
        for df in [-1, 1] {
            let Some(to) = from.offset(df, direction) else {
                continue;
            };
            if let Some(target) = self.board.piece_at(to) {
                if target.color != color {
                    if i32::from(to.rank()) == promotion_rank {
                        for kind in PROMOTION_KINDS {
                            moves.push(Move::promoting(from, to, kind));
                        }
                    } else {
                        moves.push(Move::with_flag(from, to, MoveFlag::Capture));
                    }
                }
            }
            if Some(to) == self.board.position().en_passant {
                moves.push(Move::with_flag(from, to, MoveFlag::EnPassant));
            }
        }
    }

    fn leaper_moves(
        &self,
        from: Square,
        color: Color,
        offsets: &[(i32, i32); 8],
        moves: &mut Vec<Move>,
    ) {
        for &(df, dr) in offsets {
            if let Some(to) = from.offset(df, dr) {
                self.push_if_target_ok(from, to, color, moves);
            }
        }
    }

    fn slider_moves(
        &self,
        from: Square,
        color: Color,
        dirs: &[(i32, i32); 4],
        moves: &mut Vec<Move>,
    ) {
        for &(df, dr) in dirs {
            let mut step = 1;
            while let Some(to) = from.offset(df * step, dr * step) {
                match self.board.piece_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(target) => {
                        if target.color != color {
                            moves.push(Move::with_flag(from, to, MoveFlag::Capture));
                        }
                        break;
                    }
                }
                step += 1;
            }
        }
    }

    fn king_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        self.leaper_moves(from, color, &KING_OFFSETS, moves);

        // Castling: never out of check, transit squares empty, neither the
        // transit nor the destination attacked, the right intact and the
        // rook still on its corner.
        if self.board.is_check(color) {
            return;
        }
        let enemy = color.opposite();
        let rank = from.rank();

        if self.board.position().castling.kingside(color) && self.rook_on(Square::new(7, rank), color)
        {
            if let (Some(f), Some(g)) = (from.offset(1, 0), from.offset(2, 0)) {
                if self.board.piece_at(f).is_none()
                    && self.board.piece_at(g).is_none()
                    && !self.board.is_square_attacked(f, enemy)
                    && !self.board.is_square_attacked(g, enemy)
                {
                    moves.push(Move::with_flag(from, g, MoveFlag::Castling));
                }
            }
        }

        if self.board.position().castling.queenside(color)
            && self.rook_on(Square::new(0, rank), color)
        {
            if let (Some(d), Some(c), Some(b)) =
                (from.offset(-1, 0), from.offset(-2, 0), from.offset(-3, 0))
            {
                if self.board.piece_at(d).is_none()
                    && self.board.piece_at(c).is_none()
                    && self.board.piece_at(b).is_none()
                    && !self.board.is_square_attacked(d, enemy)
                    && !self.board.is_square_attacked(c, enemy)
                {
                    moves.push(Move::with_flag(from, c, MoveFlag::Castling));
                }
            }
        }
    }

    fn rook_on(&self, sq: Square, color: Color) -> bool {
        self.board.piece_at(sq) == Some(Piece::new(PieceKind::Rook, color))
    }

    fn push_if_target_ok(&self, from: Square, to: Square, color: Color, moves: &mut Vec<Move>) {
        match self.board.piece_at(to) {
            None => moves.push(Move::new(from, to)),
            Some(target) if target.color != color => {
                moves.push(Move::with_flag(from, to, MoveFlag::Capture));
            }
            Some(_) => {}
        }
    }
}

impl Board {
    /// Count leaf nodes of the legal move tree to `depth`. A movegen
    /// correctness harness, compared against known values in the tests.
    #[must_use]
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = MoveGenerator::new(self).generate_legal_moves(self.side_to_move());
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for m in moves {
            self.make_move(m);
            nodes += self.perft(depth - 1);
            self.unmake_move(m);
        }
        nodes
    }
}
