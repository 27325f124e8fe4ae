//! Search orchestration.
//!
//! The engine walks the game tree with a negamax alpha-beta search
//! and quiescence at the leaves, orders moves with a single numeric
//! heuristic, deepens iteratively under a wall-clock budget, and fans the
//! root out across worker threads when the position is wide and deep enough
//! to pay for it.

mod heuristics;
mod log;
mod ordering;
mod parallel;
mod search;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{Board, Color, Move, MoveGenerator};
use crate::sync::StopFlag;

pub use self::heuristics::RepetitionWindow;
use self::log::SearchLog;
use self::search::SearchContext;

/// Window bound for the root search. Finite so scores can be negated and
/// adjusted without overflow.
pub(crate) const SCORE_INF: i32 = 1_000_000;

/// Sentinel returned when the side to move is checkmated.
pub(crate) const MATE_SCORE: i32 = 100_000;

/// Quiescence recursion cap.
pub(crate) const MAX_QUIESCE_DEPTH: u32 = 3;

/// Default search depth when none is configured.
pub const DEFAULT_DEPTH: u32 = 5;

/// Parallel root search kicks in only for positions at least this wide and
/// searches at least this deep.
const PARALLEL_MIN_MOVES: usize = 4;
const PARALLEL_MIN_DEPTH: u32 = 3;

/// Iterative deepening does not start another depth with less than this
/// much budget remaining.
const MIN_ITERATION_BUDGET_MS: u64 = 100;

/// Snapshot returned once per top-level search call.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// The chosen move; invalid (`from == to`) when no legal move existed.
    pub best_move: Move,
    /// Score of the chosen move from the searching side's perspective, in
    /// centipawns.
    pub score: i32,
    /// Depth the result was computed at.
    pub depth: u32,
    /// Nodes visited across the whole search.
    pub nodes: u64,
    /// Wall-clock time spent, in seconds.
    pub elapsed_secs: f64,
}

impl SearchResult {
    /// The empty result: zero score, zero stats, invalid move.
    #[must_use]
    pub fn none() -> SearchResult {
        SearchResult {
            best_move: Move::NONE,
            score: 0,
            depth: 0,
            nodes: 0,
            elapsed_secs: 0.0,
        }
    }
}

/// Callback invoked synchronously once per root move that improves on the
/// best score found so far, with `(depth, score, move)`.
pub type ProgressCallback = Arc<dyn Fn(u32, i32, Move) + Send + Sync>;

/// The search engine. Holds configuration and per-game search state; the
/// board itself is borrowed per call so the caller keeps ownership of the
/// shared game state.
pub struct Engine {
    max_depth: u32,
    stop: StopFlag,
    progress: Option<ProgressCallback>,
    log: SearchLog,
    repetition: RepetitionWindow,
}

impl Engine {
    #[must_use]
    pub fn new() -> Engine {
        Engine {
            max_depth: DEFAULT_DEPTH,
            stop: StopFlag::new(),
            progress: None,
            log: SearchLog::disabled(),
            repetition: RepetitionWindow::new(),
        }
    }

    /// Set the search depth used as the iterative-deepening cap.
    pub fn set_depth(&mut self, depth: u32) {
        self.max_depth = depth.max(1);
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.max_depth
    }

    /// Register a progress callback; see [`ProgressCallback`].
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress = Some(callback);
    }

    /// Forget per-game search state. The repetition window deliberately
    /// persists across searches of one game; call this when the engine is
    /// pointed at a fresh one.
    pub fn new_game(&mut self) {
        self.repetition.reset();
    }

    /// Route the engine log to `path`, appending. An empty path disables
    /// logging entirely; no I/O is attempted while disabled.
    pub fn set_log_file<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            self.log = SearchLog::disabled();
        } else {
            self.log = SearchLog::open(path);
        }
    }

    /// Request cancellation of the search in flight. Safe to call from any
    /// thread through a clone of [`Engine::stop_flag`].
    pub fn stop(&self) {
        self.stop.set();
    }

    /// A handle on the engine's cancellation token.
    #[must_use]
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Fixed-depth search for the best move for `color`.
    ///
    /// Returns the empty result when `color` has no legal move (checkmate or
    /// stalemate); callers distinguish the two through
    /// [`Board::is_checkmate`].
    pub fn find_best_move(&mut self, board: &mut Board, color: Color, max_depth: u32) -> SearchResult {
        let max_depth = max_depth.max(1);
        self.max_depth = max_depth;
        self.stop.clear();

        let started = Instant::now();

        let mut moves = MoveGenerator::new(board).generate_legal_moves(color);
        if moves.is_empty() {
            return SearchResult::none();
        }
        ordering::order_moves(board, &mut moves);

        self.log.search_start(color, max_depth, None, &board.to_fen());

        let use_parallel = moves.len() >= PARALLEL_MIN_MOVES && max_depth >= PARALLEL_MIN_DEPTH;
        let (best_move, best_score, nodes) = if use_parallel {
            self.log
                .line(&format!("parallel root search across {} moves", moves.len()));
            parallel::search_root(
                board,
                &moves,
                color,
                max_depth,
                &self.stop,
                self.progress.as_ref(),
            )
        } else {
            self.search_root_sequential(board, &moves, color, max_depth)
        };

        let result = SearchResult {
            best_move,
            score: best_score,
            depth: max_depth,
            nodes,
            elapsed_secs: started.elapsed().as_secs_f64(),
        };
        self.log.search_result(&result);
        result
    }

    /// Iterative deepening under a wall-clock budget.
    ///
    /// Deepens from 1 up to the configured depth, refusing to start a new
    /// iteration once the deadline has passed or less than 100 ms remain. A
    /// depth interrupted by [`Engine::stop`] contributes nothing; the last
    /// completed depth's result is returned, which is never empty once depth
    /// 1 has completed.
    pub fn find_best_move_with_time_limit(
        &mut self,
        board: &mut Board,
        color: Color,
        time_ms: u64,
    ) -> SearchResult {
        self.stop.clear();
        let depth_cap = self.max_depth;

        self.log.search_start(color, depth_cap, Some(time_ms), &board.to_fen());

        let started = Instant::now();
        let deadline = started + Duration::from_millis(time_ms);
        let mut last = SearchResult::none();

        for depth in 1..=depth_cap {
            let now = Instant::now();
            if now >= deadline {
                self.log
                    .line(&format!("deadline reached, keeping depth {} result", depth - 1));
                break;
            }
            let remaining = deadline.duration_since(now).as_millis() as u64;
            if remaining < MIN_ITERATION_BUDGET_MS {
                self.log.line(&format!(
                    "only {remaining}ms left, keeping depth {} result",
                    depth - 1
                ));
                break;
            }

            self.log
                .line(&format!("searching depth {depth}, {remaining}ms remaining"));
            let result = self.find_best_move(board, color, depth);

            if self.stop.is_set() {
                // The iteration was cancelled mid-search; its result is not
                // trustworthy.
                self.log.line("stopped during iteration, discarding it");
                break;
            }
            last = result;

            if Instant::now() >= deadline {
                ::log::debug!("search deadline expired after depth {depth}");
                self.log.line("deadline expired during iteration");
                break;
            }
        }

        self.stop.clear();
        self.max_depth = depth_cap;
        self.log.line("time-limited search finished");
        last
    }

    fn search_root_sequential(
        &mut self,
        board: &mut Board,
        moves: &[Move],
        color: Color,
        depth: u32,
    ) -> (Move, i32, u64) {
        let mut best_move = moves[0];
        let mut best_score = -SCORE_INF;

        let mut ctx = SearchContext::new(board, &self.stop);
        for &m in moves {
            if ctx.stopped() {
                break;
            }

            ctx.board.make_move(m);
            let mut score = -ctx.alpha_beta(depth - 1, -SCORE_INF, SCORE_INF, color.opposite());

            let penalty = self.repetition.observe(&ctx.board.to_fen());
            if penalty > 0 {
                score -= penalty;
                self.log
                    .line(&format!("  repetition penalty for {m}: -{penalty}"));
            }

            let bonus = heuristics::endgame_mate_bonus(ctx.board, color);
            if bonus != 0 {
                score += bonus;
                self.log.line(&format!("  endgame steering bonus for {m}: +{bonus}"));
            }

            ctx.board.unmake_move(m);

            if ctx.stopped() {
                break;
            }

            self.log.move_evaluated(m, score, depth, ctx.nodes);

            if score > best_score {
                best_score = score;
                best_move = m;
                if let Some(callback) = &self.progress {
                    callback(depth, score, m);
                }
            }
        }

        (best_move, best_score, ctx.nodes)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
