use super::state::UndoInfo;
use super::{Board, Color, Move, Piece, PieceKind, Square};

impl Board {
    /// Apply `m` in place, pushing an undo record first.
    ///
    /// Handles rook relocation for castling, pawn replacement for promotion,
    /// the adjacent-square removal for en passant, the en-passant target,
    /// castling-rights upkeep, the halfmove clock and the fullmove counter.
    /// The move is not validated; callers obtain moves from the generator.
    pub fn make_move(&mut self, m: Move) {
        let Some(moving) = self.piece_at(m.from) else {
            // Empty origin square: nothing sensible to do.
            return;
        };

        self.history.push(UndoInfo {
            captured: self.piece_at(m.to),
            position: self.position,
        });

        if moving.kind == PieceKind::Pawn || m.is_capture() {
            self.position.halfmove_clock = 0;
        } else {
            self.position.halfmove_clock += 1;
        }

        self.set_piece(m.to, moving);
        self.remove_piece(m.from);

        if m.is_castling() {
            let rank = m.from.rank();
            let (rook_from, rook_to) = if m.to.file() == 6 {
                (Square::new(7, rank), Square::new(5, rank))
            } else {
                (Square::new(0, rank), Square::new(3, rank))
            };
            if let Some(rook) = self.piece_at(rook_from) {
                self.set_piece(rook_to, rook);
                self.remove_piece(rook_from);
            }
        }

        if m.is_promotion() {
            if let Some(kind) = m.promotion {
                self.set_piece(m.to, Piece::new(kind, moving.color));
            }
        }

        if m.is_en_passant() {
            // The captured pawn sits beside the destination, on the origin's
            // rank.
            self.remove_piece(Square::new(m.to.file(), m.from.rank()));
        }

        self.position.en_passant = None;
        if moving.kind == PieceKind::Pawn
            && (i32::from(m.to.rank()) - i32::from(m.from.rank())).abs() == 2
        {
            let ep_rank = (m.from.rank() + m.to.rank()) / 2;
            self.position.en_passant = Some(Square::new(m.from.file(), ep_rank));
        }

        self.update_castling_rights(m, moving);

        let next_side = self.position.side_to_move.opposite();
        if next_side == Color::White {
            self.position.fullmove_number += 1;
        }
        self.position.side_to_move = next_side;
    }

    fn update_castling_rights(&mut self, m: Move, moving: Piece) {
        if moving.kind == PieceKind::King {
            self.position.castling.clear(moving.color);
        }

        if moving.kind == PieceKind::Rook {
            for color in [Color::White, Color::Black] {
                let home_rank = if color == Color::White { 0 } else { 7 };
                if m.from == Square::new(0, home_rank) {
                    self.position.castling.clear_queenside(color);
                } else if m.from == Square::new(7, home_rank) {
                    self.position.castling.clear_kingside(color);
                }
            }
        }

        // A rook captured on its corner loses the right too; otherwise the
        // generator could castle with a missing rook.
        if let Some(undo) = self.history.last() {
            if let Some(captured) = undo.captured {
                if captured.kind == PieceKind::Rook {
                    let home_rank = if captured.color == Color::White { 0 } else { 7 };
                    if m.to == Square::new(0, home_rank) {
                        self.position.castling.clear_queenside(captured.color);
                    } else if m.to == Square::new(7, home_rank) {
                        self.position.castling.clear_kingside(captured.color);
                    }
                }
            }
        }
    }

    /// Exactly invert the most recent `make_move`, restoring the position
    /// snapshot wholesale. A call with no matching make is a no-op.
    pub fn unmake_move(&mut self, m: Move) {
        let Some(undo) = self.history.pop() else {
            return;
        };

        self.position = undo.position;

        let moving = self.piece_at(m.to);
        if let Some(piece) = moving {
            self.set_piece(m.from, piece);
        }
        self.squares[m.to.index()] = undo.captured;

        if m.is_castling() {
            let rank = m.from.rank();
            let (rook_moved, rook_home) = if m.to.file() == 6 {
                (Square::new(5, rank), Square::new(7, rank))
            } else {
                (Square::new(3, rank), Square::new(0, rank))
            };
            if let Some(rook) = self.piece_at(rook_moved) {
                self.set_piece(rook_home, rook);
                self.remove_piece(rook_moved);
            }
        }

        if m.is_promotion() {
            if let Some(piece) = moving {
                self.set_piece(m.from, Piece::new(PieceKind::Pawn, piece.color));
            }
        }

        if m.is_en_passant() {
            if let Some(piece) = moving {
                self.set_piece(
                    Square::new(m.to.file(), m.from.rank()),
                    Piece::new(PieceKind::Pawn, piece.color.opposite()),
                );
            }
            self.remove_piece(m.to);
        }
    }
}
