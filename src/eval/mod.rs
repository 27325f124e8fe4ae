//! Static position evaluation.
//!
//! Five independent terms, each signed so that a positive net total favors
//! White: material, piece-square placement, mobility, king safety and pawn
//! structure. Every term is a deterministic function of the board alone.
//! Mobility runs a full legal-move generation for both colors, which makes
//! evaluation itself a significant share of search cost.

mod pst;

use crate::board::{Board, Color, MoveGenerator, Piece, PieceKind, Square};
use pst::{
    BISHOP_TABLE, ENDGAME_MATERIAL_THRESHOLD, KING_ENDGAME_TABLE, KING_MIDGAME_TABLE,
    KNIGHT_TABLE, PAWN_TABLE, QUEEN_TABLE, ROOK_TABLE,
};

const MOBILITY_WEIGHT: i32 = 10;
const KING_SHIELD_BONUS: i32 = 10;
const DOUBLED_PAWN_PENALTY: i32 = 20;
const ISOLATED_PAWN_PENALTY: i32 = 15;

/// Scores a board snapshot from White's perspective.
pub struct Evaluator<'a> {
    board: &'a Board,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(board: &'a Board) -> Evaluator<'a> {
        Evaluator { board }
    }

    /// Centipawn score, positive when White stands better.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        self.material() + self.positional() + self.mobility() + self.king_safety()
            + self.pawn_structure()
    }

    fn material(&self) -> i32 {
        let mut score = 0;
        for sq in Square::all() {
            if let Some(piece) = self.board.piece_at(sq) {
                score += signed(piece.value(), piece.color);
            }
        }
        score
    }

    fn positional(&self) -> i32 {
        let mut score = 0;
        for sq in Square::all() {
            if let Some(piece) = self.board.piece_at(sq) {
                score += signed(self.piece_square_value(piece, sq), piece.color);
            }
        }
        score
    }

    fn piece_square_value(&self, piece: Piece, sq: Square) -> i32 {
        // Tables are laid out with rank 8 first, so White lookups flip the
        // rank and Black lookups index directly.
        let index = match piece.color {
            Color::White => sq.index() ^ 56,
            Color::Black => sq.index(),
        };
        match piece.kind {
            PieceKind::Pawn => PAWN_TABLE[index],
            PieceKind::Knight => KNIGHT_TABLE[index],
            PieceKind::Bishop => BISHOP_TABLE[index],
            PieceKind::Rook => ROOK_TABLE[index],
            PieceKind::Queen => QUEEN_TABLE[index],
            PieceKind::King => {
                if self.is_endgame() {
                    KING_ENDGAME_TABLE[index]
                } else {
                    KING_MIDGAME_TABLE[index]
                }
            }
        }
    }

    fn mobility(&self) -> i32 {
        let generator = MoveGenerator::new(self.board);
        let white = generator.generate_legal_moves(Color::White).len() as i32;
        let black = generator.generate_legal_moves(Color::Black).len() as i32;
        (white - black) * MOBILITY_WEIGHT
    }

    /// Bonus per pawn shielding the king's three forward files. Middlegame
    /// only; a castled king with its pawn cover intact stops mattering once
    /// the heavy pieces are gone.
    fn king_safety(&self) -> i32 {
        if self.is_endgame() {
            return 0;
        }
        let mut score = 0;
        score += self.shield_bonus(Color::White);
        score -= self.shield_bonus(Color::Black);
        score
    }

    fn shield_bonus(&self, color: Color) -> i32 {
        let Some(king_sq) = self.board.find_king(color) else {
            return 0;
        };
        let forward = match color {
            Color::White => 1,
            Color::Black => -1,
        };
        let mut bonus = 0;
        for df in -1..=1 {
            if let Some(front) = king_sq.offset(df, forward) {
                if self.board.piece_at(front)
                    == Some(Piece::new(PieceKind::Pawn, color))
                {
                    bonus += KING_SHIELD_BONUS;
                }
            }
        }
        bonus
    }

    fn pawn_structure(&self) -> i32 {
        let mut score = 0;
        let mut white_per_file = [0i32; 8];
        let mut black_per_file = [0i32; 8];

        for sq in Square::all() {
            if let Some(piece) = self.board.piece_at(sq) {
                if piece.kind == PieceKind::Pawn {
                    match piece.color {
                        Color::White => white_per_file[sq.file() as usize] += 1,
                        Color::Black => black_per_file[sq.file() as usize] += 1,
                    }
                }
            }
        }

        for file in 0..8usize {
            if white_per_file[file] > 1 {
                score -= DOUBLED_PAWN_PENALTY * (white_per_file[file] - 1);
            }
            if black_per_file[file] > 1 {
                score += DOUBLED_PAWN_PENALTY * (black_per_file[file] - 1);
            }

            let adjacent_white = (file > 0 && white_per_file[file - 1] > 0)
                || (file < 7 && white_per_file[file + 1] > 0);
            let adjacent_black = (file > 0 && black_per_file[file - 1] > 0)
                || (file < 7 && black_per_file[file + 1] > 0);

            if white_per_file[file] > 0 && !adjacent_white {
                score -= ISOLATED_PAWN_PENALTY;
            }
            if black_per_file[file] > 0 && !adjacent_black {
                score += ISOLATED_PAWN_PENALTY;
            }
        }

        score
    }

    fn is_endgame(&self) -> bool {
        let mut total = 0;
        for sq in Square::all() {
            if let Some(piece) = self.board.piece_at(sq) {
                if piece.kind != PieceKind::King && piece.kind != PieceKind::Pawn {
                    total += piece.value();
                }
            }
        }
        total < ENDGAME_MATERIAL_THRESHOLD
    }
}

fn signed(value: i32, color: Color) -> i32 {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let board = Board::new();
        assert_eq!(Evaluator::new(&board).evaluate(), 0);
    }

    #[test]
    fn material_counts_both_sides() {
        let board = Board::new();
        assert_eq!(Evaluator::new(&board).material(), 0);

        // Black missing the queen.
        let board =
            Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(Evaluator::new(&board).material(), 900);
    }

    #[test]
    fn queen_advantage_dominates_evaluation() {
        let white_up =
            Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(Evaluator::new(&white_up).evaluate() > 800);

        let black_up =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1");
        assert!(Evaluator::new(&black_up).evaluate() < -800);
    }

    #[test]
    fn pawn_table_rewards_advancement() {
        let board = Board::empty();
        let eval = Evaluator::new(&board);
        let white_pawn = Piece::new(PieceKind::Pawn, Color::White);
        let black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
        // Seventh-rank pawns sit on the 50-point row for both colors.
        assert_eq!(
            eval.piece_square_value(white_pawn, Square::from_name("e7").unwrap()),
            50
        );
        assert_eq!(
            eval.piece_square_value(black_pawn, Square::from_name("e2").unwrap()),
            50
        );
    }

    #[test]
    fn doubled_and_isolated_pawns_are_penalized() {
        // Two stacked white pawns on the a-file, no neighbors: one doubled
        // penalty plus one isolated file penalty.
        let board = Board::from_fen("4k3/8/8/8/8/P7/P7/4K3 w - - 0 1");
        assert_eq!(Evaluator::new(&board).pawn_structure(), -35);
    }

    #[test]
    fn king_shield_counts_forward_pawns() {
        // Heavy pieces still on board, so the middlegame shield applies.
        let board =
            Board::from_fen("rnbqkbnr/8/8/8/8/8/3PPP2/RNBQKBNR w KQkq - 0 1");
        assert_eq!(Evaluator::new(&board).king_safety(), 30);
    }

    #[test]
    fn king_centralization_pays_in_the_endgame() {
        let centralized = Board::from_fen("8/8/8/3K4/8/8/8/7k w - - 0 1");
        let cornered = Board::from_fen("K7/8/8/8/8/8/8/7k w - - 0 1");
        assert!(
            Evaluator::new(&centralized).evaluate() > Evaluator::new(&cornered).evaluate()
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let board =
            Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
        let first = Evaluator::new(&board).evaluate();
        let second = Evaluator::new(&board).evaluate();
        assert_eq!(first, second);
    }
}
