//! Chess board representation and game logic.
//!
//! The board is a 64-cell mailbox array plus a [`Position`] (side to move,
//! castling rights, en-passant target, clocks). Moves are applied in place
//! and rolled back through an undo stack, and legality is decided by
//! speculatively applying each candidate on a throwaway copy.
//!
//! # Example
//! ```
//! use castellan::board::{Board, Color, MoveGenerator};
//!
//! let board = Board::new();
//! let moves = MoveGenerator::new(&board).generate_legal_moves(Color::White);
//! assert_eq!(moves.len(), 20);
//! ```

mod attacks;
mod fen;
mod make_unmake;
mod movegen;
mod position;
mod state;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use fen::FenError;
pub use movegen::MoveGenerator;
pub use position::{CastlingRights, Position};
pub use state::Board;
pub use types::{Color, Move, MoveFlag, Piece, PieceKind, Square};
pub use validate::MoveValidator;
