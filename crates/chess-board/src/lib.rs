//! Bitboard-backed chess board that moves pieces without enforcing rules.
//!
//! This crate provides:
//! - [`Bitboard`] - a set of squares packed into a `u64`
//! - [`Board`] - twelve bitboards, one per colored piece kind, with point
//!   queries and clear/set/move primitives
//! - [`MoveError`] - why [`Board::process_move`] refused a move
//!
//! # Example
//!
//! ```
//! use chess_board::Board;
//! use chess_core::{Color, Square};
//!
//! let mut board = Board::startpos();
//! board.process_move("e2", "e4", Color::White).unwrap();
//!
//! let e4 = Square::from_algebraic("e4").unwrap();
//! assert_eq!(board.piece_label_at(e4), 'P');
//! assert!(board.process_move("d2", "d4", Color::Black).is_err());
//! ```

mod bitboard;
mod board;

pub use bitboard::Bitboard;
pub use board::{Board, MoveError, EMPTY_LABEL};
