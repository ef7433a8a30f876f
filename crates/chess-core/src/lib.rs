//! Core types for chess.
//!
//! This crate provides the value types shared by the board and the
//! interactive mover:
//! - [`Color`], [`Piece`] and [`PieceKind`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates and algebraic
//!   notation
//! - [`Setup`] for FEN piece placements

mod color;
mod piece;
mod setup;
mod square;

pub use color::Color;
pub use piece::{Piece, PieceKind};
pub use setup::{FenError, Setup};
pub use square::{File, Rank, Square, SquareError};
