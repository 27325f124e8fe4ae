use super::{Board, Color, Move};

/// Decides whether a candidate move would leave the mover's own king
/// attacked, by applying it to a throwaway copy of the board. The real board
/// is never mutated; the copy is discarded after the check.
pub struct MoveValidator<'a> {
    board: &'a Board,
}

impl<'a> MoveValidator<'a> {
    #[must_use]
    pub fn new(board: &'a Board) -> MoveValidator<'a> {
        MoveValidator { board }
    }

    /// Whether `color`'s king is attacked after `m` is played.
    #[must_use]
    pub fn leaves_king_in_check(&self, m: Move, color: Color) -> bool {
        let mut speculative = self.board.clone();
        speculative.make_move(m);
        speculative.is_check(color)
    }

    /// Full legality check for an externally supplied move: the origin must
    /// hold a piece of the moving color and the move must not expose the
    /// king.
    #[must_use]
    pub fn is_legal(&self, m: Move, color: Color) -> bool {
        let Some(piece) = self.board.piece_at(m.from) else {
            return false;
        };
        if piece.color != color {
            return false;
        }
        !self.leaves_king_in_check(m, color)
    }
}
