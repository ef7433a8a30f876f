//! Piece roles and the twelve colored piece kinds.

use crate::Color;

/// The six piece roles, independent of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl Piece {
    /// All roles, in back-rank importance order.
    pub const ALL: [Piece; 6] = [
        Piece::King,
        Piece::Queen,
        Piece::Rook,
        Piece::Bishop,
        Piece::Knight,
        Piece::Pawn,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case letter of this role.
    pub const fn letter(self) -> char {
        match self {
            Piece::King => 'k',
            Piece::Queen => 'q',
            Piece::Rook => 'r',
            Piece::Bishop => 'b',
            Piece::Knight => 'n',
            Piece::Pawn => 'p',
        }
    }
}

/// One of the twelve colored piece kinds, e.g. white knight or black pawn.
///
/// Each kind owns one occupancy mask on the board and is addressed by
/// [`PieceKind::index`], which is dense in `0..12`: the six white kinds
/// first, then the six black ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceKind {
    pub color: Color,
    pub piece: Piece,
}

impl PieceKind {
    /// Number of distinct kinds.
    pub const COUNT: usize = 12;

    /// Every kind, in [`PieceKind::index`] order.
    pub const ALL: [PieceKind; 12] = {
        let mut all = [PieceKind::new(Color::White, Piece::King); 12];
        let mut i = 0;
        while i < Self::COUNT {
            let color = if i < 6 { Color::White } else { Color::Black };
            all[i] = PieceKind::new(color, Piece::ALL[i % 6]);
            i += 1;
        }
        all
    };

    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        PieceKind { color, piece }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.color.index() * 6 + self.piece.index()
    }

    /// Single-character label: upper case for White, lower case for Black.
    pub const fn to_char(self) -> char {
        let c = self.piece.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a label. Case is significant; anything outside
    /// `KQRBNPkqrbnp` yields `None`.
    pub const fn from_char(c: char) -> Option<Self> {
        let color = match Color::of_label(c) {
            Some(color) => color,
            None => return None,
        };
        let piece = match c.to_ascii_lowercase() {
            'k' => Piece::King,
            'q' => Piece::Queen,
            'r' => Piece::Rook,
            'b' => Piece::Bishop,
            'n' => Piece::Knight,
            'p' => Piece::Pawn,
            _ => return None,
        };
        Some(PieceKind::new(color, piece))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
