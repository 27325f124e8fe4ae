//! Root-move score adjustments applied on the sequential search path.

use std::collections::VecDeque;

use crate::board::{Board, Color, PieceKind, Square};

/// How many recent positions the repetition window remembers.
const WINDOW_CAPACITY: usize = 10;

/// Penalty once a position has already been seen this many times.
const REPEAT_TRIGGER: usize = 2;

/// Flat score penalty for steering into a repeated position.
const REPEAT_PENALTY: i32 = 500;

const KING_PROXIMITY_WEIGHT: i32 = 20;
const KING_ATTACK_BONUS: i32 = 100;

/// Rolling window of recently visited piece placements, used to discourage
/// shuffling into draw-by-repetition territory.
///
/// This is a score heuristic, not a rules-correct repetition detector: it
/// keys on the placement field alone and only remembers the last few
/// positions. It is owned by its caller so the penalty stays reproducible
/// and testable regardless of how many threads search.
#[derive(Clone, Debug, Default)]
pub struct RepetitionWindow {
    recent: VecDeque<String>,
}

impl RepetitionWindow {
    #[must_use]
    pub fn new() -> RepetitionWindow {
        RepetitionWindow {
            recent: VecDeque::with_capacity(WINDOW_CAPACITY),
        }
    }

    /// Report a position about to be scored. Returns the penalty to subtract
    /// when the placement has already been seen twice in the window;
    /// otherwise records it and returns 0.
    pub fn observe(&mut self, fen: &str) -> i32 {
        let placement = fen.split_whitespace().next().unwrap_or(fen);

        let count = self.recent.iter().filter(|seen| *seen == placement).count();
        if count >= REPEAT_TRIGGER {
            return REPEAT_PENALTY;
        }

        self.recent.push_back(placement.to_string());
        if self.recent.len() > WINDOW_CAPACITY {
            self.recent.pop_front();
        }
        0
    }

    /// Forget everything, e.g. when a new game starts.
    pub fn reset(&mut self) {
        self.recent.clear();
    }
}

/// King-hunt steering for won endgames. When the opponent has nothing left
/// but the king, shallow search plus material evaluation has no gradient
/// toward mate; reward closing the king distance and attacking the bare
/// king.
pub(crate) fn endgame_mate_bonus(board: &Board, color: Color) -> i32 {
    if !opponent_is_bare_king(board, color) {
        return 0;
    }

    let (Some(own_king), Some(enemy_king)) =
        (board.find_king(color), board.find_king(color.opposite()))
    else {
        return 0;
    };

    let file_distance = (i32::from(own_king.file()) - i32::from(enemy_king.file())).abs();
    let rank_distance = (i32::from(own_king.rank()) - i32::from(enemy_king.rank())).abs();
    let distance = file_distance + rank_distance;

    let mut bonus = (14 - distance) * KING_PROXIMITY_WEIGHT;
    if board.is_square_attacked(enemy_king, color) {
        bonus += KING_ATTACK_BONUS;
    }
    bonus
}

fn opponent_is_bare_king(board: &Board, color: Color) -> bool {
    let opponent = color.opposite();
    let mut king_seen = false;
    for sq in Square::all() {
        if let Some(piece) = board.piece_at(sq) {
            if piece.color == opponent {
                if piece.kind == PieceKind::King {
                    king_seen = true;
                } else {
                    return false;
                }
            }
        }
    }
    king_seen
}
