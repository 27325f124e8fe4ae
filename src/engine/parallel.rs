//! Bounded parallel search at the root.
//!
//! One worker per root move, nothing deeper. Each worker reconstructs its
//! own board from a single FEN snapshot of the current position, applies its
//! one move and runs a sequential alpha-beta below it, so no shared board
//! mutation exists to race on. The only cross-thread state is the stop flag,
//! the read-only snapshot and a shared node counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::board::{Board, Color, Move};
use crate::sync::StopFlag;

use super::search::SearchContext;
use super::{ProgressCallback, SCORE_INF};

/// Search every root move on its own thread and reduce the results.
///
/// Results are collected in submission order, which follows the already
/// ordered candidate list, and reduced with a strict greater-than
/// comparison: ties go to the earliest-generated move, so the outcome does
/// not depend on thread scheduling. Workers do no engine logging and skip
/// the sequential path's repetition and endgame adjustments.
pub(crate) fn search_root(
    board: &Board,
    moves: &[Move],
    color: Color,
    depth: u32,
    stop: &StopFlag,
    progress: Option<&ProgressCallback>,
) -> (Move, i32, u64) {
    let snapshot = board.to_fen();
    let total_nodes = Arc::new(AtomicU64::new(0));

    log::debug!(
        "dispatching {} root workers at depth {depth}",
        moves.len()
    );

    let mut workers: Vec<(Move, JoinHandle<i32>)> = Vec::with_capacity(moves.len());
    for &m in moves {
        if stop.is_set() {
            break;
        }

        let snapshot = snapshot.clone();
        let stop = stop.clone();
        let nodes = Arc::clone(&total_nodes);

        let handle = thread::Builder::new()
            .name(format!("search-{m}"))
            .spawn(move || {
                let mut local = Board::from_fen(&snapshot);
                local.make_move(m);
                let mut ctx = SearchContext::new(&mut local, &stop);
                let score = -ctx.alpha_beta(depth - 1, -SCORE_INF, SCORE_INF, color.opposite());
                nodes.fetch_add(ctx.nodes, Ordering::Relaxed);
                score
            })
            .expect("failed to spawn search worker");

        workers.push((m, handle));
    }

    let mut best_move = moves[0];
    let mut best_score = -SCORE_INF;

    for (m, handle) in workers {
        let Ok(score) = handle.join() else {
            continue;
        };
        if stop.is_set() {
            continue;
        }

        if score > best_score {
            best_score = score;
            best_move = m;
            if let Some(callback) = progress {
                callback(depth, score, m);
            }
        }
    }

    (best_move, best_score, total_nodes.load(Ordering::Relaxed))
}
