//! Interactive two-player piece mover on a bitboard chess board.
//!
//! Players alternate typing moves such as `e2 e4`. Any own piece may go to
//! any square; there are no chess rules beyond whose turn it is.

pub mod config;
pub mod session;

pub use config::{ConfigError, MoverConfig};
pub use session::{split_move, Session, SessionEnd, SessionError};
