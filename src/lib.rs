//! A classical chess engine library.
//!
//! The crate is split into three layers: a mailbox [`Board`] with full
//! make/unmake support and FEN serialization, a static [`Evaluator`], and an
//! [`Engine`] that runs an alpha-beta search with quiescence, iterative
//! deepening under a wall-clock budget, and a bounded parallel search at the
//! root.
//!
//! # Example
//! ```
//! use castellan::{Board, Color, Engine};
//!
//! let mut board = Board::new();
//! let mut engine = Engine::new();
//! let result = engine.find_best_move(&mut board, Color::White, 2);
//! assert!(result.best_move.is_valid());
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod sync;

pub use board::{
    Board, CastlingRights, Color, FenError, Move, MoveFlag, MoveGenerator, MoveValidator, Piece,
    PieceKind, Position, Square,
};
pub use engine::{Engine, ProgressCallback, RepetitionWindow, SearchResult};
pub use eval::Evaluator;
pub use sync::StopFlag;
