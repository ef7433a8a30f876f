//! Starting setups written in FEN (Forsyth-Edwards Notation).
//!
//! Only the piece placement and the active color carry meaning here. Any
//! further FEN fields (castling, en passant, clocks) are accepted and
//! ignored.

use thiserror::Error;

use crate::{Color, PieceKind, Square};

/// Errors that can occur when parsing a setup string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),
}

/// A validated piece placement plus the side to move first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    /// Occupied squares and their pieces, in square index order.
    pub pieces: Vec<(Square, PieceKind)>,
    /// Side to move first. White unless the FEN says otherwise.
    pub side_to_move: Color,
}

impl Setup {
    /// Placement of the standard initial position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// The standard initial position, White to move.
    pub fn startpos() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }

    /// Parses a placement field, optionally followed by further FEN fields.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() || parts.len() > 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let pieces = Self::parse_placement(parts[0])?;

        let side_to_move = match parts.get(1).copied() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        Ok(Setup {
            pieces,
            side_to_move,
        })
    }

    fn parse_placement(placement: &str) -> Result<Vec<(Square, PieceKind)>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::with_capacity(32);
        // FEN lists rank 8 first.
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip @ 1..=8) = c.to_digit(10) {
                    file += skip as u8;
                } else if let Some(kind) = PieceKind::from_char(c) {
                    if file < 8 {
                        if let Some(sq) = Square::from_index(rank * 8 + file) {
                            pieces.push((sq, kind));
                        }
                    }
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                if file > 8 {
                    break;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        pieces.sort_by_key(|(sq, _)| *sq);
        Ok(pieces)
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::startpos()
    }
}
