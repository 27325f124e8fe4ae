use std::cmp::Reverse;

use once_cell::sync::Lazy;

use crate::board::{Board, Move, PieceKind};

const PROMOTION_BONUS: i32 = 8000;

/// Centrality bonus per destination square: `(14 - manhattan distance to the
/// center) * 10`, so central squares order first among otherwise equal
/// moves.
static CENTER_BONUS: Lazy<[i32; 64]> = Lazy::new(|| {
    let mut table = [0i32; 64];
    for (index, bonus) in table.iter_mut().enumerate() {
        let file = (index % 8) as i32;
        let rank = (index / 8) as i32;
        let distance = (file - 3).abs() + (rank - 3).abs();
        *bonus = (14 - distance) * 10;
    }
    table
});

/// Sort candidate moves so the likeliest cutoffs come first. A pruning
/// efficiency heuristic only; correctness never depends on the order. The
/// sort is stable, so ties keep generation order and result selection stays
/// deterministic.
pub(crate) fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&m| Reverse(score_move(board, m)));
}

/// Single numeric ordering score: captures by most-valuable-victim /
/// least-valuable-attacker, a flat bonus for promotions, and a small
/// centrality bonus for every move.
pub(crate) fn score_move(board: &Board, m: Move) -> i32 {
    let mut score = 0;

    if m.is_capture() {
        let attacker = board.piece_at(m.from).map_or(0, |p| p.value());
        // The en-passant victim is never on the destination square.
        let victim = if m.is_en_passant() {
            PieceKind::Pawn.value()
        } else {
            board.piece_at(m.to).map_or(0, |p| p.value())
        };
        score = victim * 10 - attacker;
    }

    if m.is_promotion() {
        score += PROMOTION_BONUS;
    }

    score + CENTER_BONUS[m.to.index()]
}
