//! Piece placement held as twelve occupancy bitboards.

use std::fmt;

use chess_core::{Color, PieceKind, Setup, Square};
use thiserror::Error;

use crate::Bitboard;

/// Label rendered for a square without a piece.
pub const EMPTY_LABEL: char = '-';

/// Reasons a requested move is refused.
///
/// The `Display` text of each variant is the message shown to the player.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    /// One of the two squares is not valid algebraic notation.
    #[error("Invalid square notation.")]
    InvalidNotation,

    /// The origin square holds no piece. Carries the notation as typed.
    #[error("No piece at {0}.")]
    EmptySquare(String),

    /// The origin piece belongs to the side not on move.
    #[error("It's {}'s turn. Move a {} piece.", .0, .0.name())]
    WrongTurn(Color),
}

/// A chess board without rules.
///
/// Every [`PieceKind`] owns one [`Bitboard`]. The masks never share a set
/// bit: each mutation empties the target square in all twelve before
/// placing anything. Piece counts are not checked, so a board may hold
/// three queens or no king.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pieces: [Bitboard; PieceKind::COUNT],
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            pieces: [Bitboard::EMPTY; PieceKind::COUNT],
        }
    }

    /// The standard initial position.
    pub fn startpos() -> Self {
        Self::from_setup(&Setup::startpos())
    }

    /// A board holding the pieces of `setup`.
    pub fn from_setup(setup: &Setup) -> Self {
        let mut board = Self::empty();
        for &(sq, kind) in &setup.pieces {
            board.put(sq, kind);
        }
        board
    }

    /// Parses algebraic notation into a square, `None` when malformed.
    #[inline]
    pub fn notation_to_index(notation: &str) -> Option<Square> {
        Square::from_algebraic(notation)
    }

    /// Occupancy mask of one piece kind.
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Union of all twelve masks.
    pub fn all_full_squares(&self) -> Bitboard {
        self.pieces
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    /// Whether any piece stands on `sq`.
    pub fn is_square_full(&self, sq: Square) -> bool {
        self.all_full_squares().contains(sq)
    }

    /// The piece standing on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[kind.index()].contains(sq))
    }

    /// Label of the piece on `sq`, or [`EMPTY_LABEL`].
    pub fn piece_label_at(&self, sq: Square) -> char {
        self.piece_at(sq).map_or(EMPTY_LABEL, PieceKind::to_char)
    }

    /// Removes whatever stands on `sq`.
    pub fn clear_square(&mut self, sq: Square) {
        for bb in &mut self.pieces {
            bb.clear(sq);
        }
    }

    /// Empties `sq` and places the piece named by `label` there.
    ///
    /// A label outside `KQRBNPkqrbnp` leaves the square empty.
    pub fn set_square(&mut self, sq: Square, label: char) {
        self.clear_square(sq);
        match PieceKind::from_char(label) {
            Some(kind) => self.pieces[kind.index()].set(sq),
            None => tracing::debug!(square = %sq, label = ?label, "dropping unknown piece label"),
        }
    }

    /// Empties `sq` and places `kind` there.
    pub fn put(&mut self, sq: Square, kind: PieceKind) {
        self.clear_square(sq);
        self.pieces[kind.index()].set(sq);
    }

    /// Relocates the piece on `from` to `to`, replacing anything on `to`.
    ///
    /// Does nothing when `from` is empty. Moving a piece onto its own square
    /// leaves the board unchanged.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        if let Some(kind) = self.piece_at(from) {
            self.clear_square(from);
            self.put(to, kind);
        }
    }

    /// Checks and applies a move typed as two squares.
    ///
    /// The checks run in order and the first failure is returned: both
    /// squares must parse, `from` must be occupied, and the piece on it must
    /// belong to `side_to_move`. Movement rules are not consulted; any own
    /// piece may go to any square, capturing whatever stands there.
    pub fn process_move(
        &mut self,
        from: &str,
        to: &str,
        side_to_move: Color,
    ) -> Result<(), MoveError> {
        let (from_sq, to_sq) = match (
            Self::notation_to_index(from),
            Self::notation_to_index(to),
        ) {
            (Some(f), Some(t)) => (f, t),
            _ => return Err(MoveError::InvalidNotation),
        };

        let kind = self
            .piece_at(from_sq)
            .ok_or_else(|| MoveError::EmptySquare(from.to_string()))?;

        if kind.color != side_to_move {
            return Err(MoveError::WrongTurn(side_to_move));
        }

        let captured = self.piece_at(to_sq).filter(|_| from_sq != to_sq);
        self.move_piece(from_sq, to_sq);
        tracing::debug!(
            piece = %kind,
            from = %from_sq,
            to = %to_sq,
            captured = ?captured.map(PieceKind::to_char),
            "piece moved"
        );
        Ok(())
    }

    /// Piece placement field of FEN for the current board.
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8u8).rev() {
            let mut empty_run = 0;
            for file in 0..8u8 {
                match Square::from_index(rank * 8 + file).and_then(|sq| self.piece_at(sq)) {
                    Some(kind) => {
                        if empty_run > 0 {
                            fen.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        fen.push(kind.to_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Draws the board as text, rank 8 at the top, followed by the file letters.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let label = Square::from_index(rank * 8 + file)
                    .map_or(EMPTY_LABEL, |sq| self.piece_label_at(sq));
                write!(f, "{} ", label)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen_placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Piece;
    use proptest::prelude::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn assert_disjoint(board: &Board) {
        let mut seen = Bitboard::EMPTY;
        for kind in PieceKind::ALL {
            let bb = board.pieces(kind);
            assert!((seen & bb).is_empty(), "{kind} overlaps another mask");
            seen |= bb;
        }
    }

    #[test]
    fn startpos_layout() {
        let board = Board::startpos();
        assert_eq!(board.all_full_squares().0, 0xFFFF_0000_0000_FFFF);
        assert_eq!(board.pieces(PieceKind::from_char('P').unwrap()).0, 0xFF00);
        assert_eq!(
            board.pieces(PieceKind::from_char('p').unwrap()).0,
            0x00FF_0000_0000_0000
        );
        assert_eq!(board.piece_label_at(sq("e1")), 'K');
        assert_eq!(board.piece_label_at(sq("d1")), 'Q');
        assert_eq!(board.piece_label_at(sq("e8")), 'k');
        assert_eq!(board.piece_label_at(sq("d8")), 'q');
        assert_eq!(board.piece_label_at(sq("b8")), 'n');
        assert_eq!(board.piece_label_at(sq("e4")), EMPTY_LABEL);
        assert_disjoint(&board);
    }

    #[test]
    fn renders_startpos() {
        let expected = "\
8 r n b q k b n r \n\
7 p p p p p p p p \n\
6 - - - - - - - - \n\
5 - - - - - - - - \n\
4 - - - - - - - - \n\
3 - - - - - - - - \n\
2 P P P P P P P P \n\
1 R N B Q K B N R \n\
\x20\x20a b c d e f g h\n";
        assert_eq!(Board::startpos().to_string(), expected);
    }

    #[test]
    fn fen_placement_export() {
        let mut board = Board::startpos();
        assert_eq!(board.to_fen_placement(), Setup::STARTPOS);
        board.move_piece(sq("e2"), sq("e4"));
        assert_eq!(
            board.to_fen_placement(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
        );
        assert_eq!(Board::empty().to_fen_placement(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn is_square_full_follows_union() {
        let board = Board::startpos();
        assert!(board.is_square_full(sq("a1")));
        assert!(board.is_square_full(sq("h7")));
        assert!(!board.is_square_full(sq("d5")));
    }

    #[test]
    fn set_square_replaces_content() {
        let mut board = Board::startpos();
        board.set_square(sq("e1"), 'q');
        assert_eq!(board.piece_label_at(sq("e1")), 'q');
        assert!(board
            .pieces(PieceKind::new(Color::White, Piece::King))
            .is_empty());
        assert_disjoint(&board);
    }

    #[test]
    fn set_square_drops_unknown_label() {
        let mut board = Board::startpos();
        board.set_square(sq("a1"), 'x');
        assert_eq!(board.piece_label_at(sq("a1")), EMPTY_LABEL);
        board.set_square(sq("a2"), EMPTY_LABEL);
        assert!(!board.is_square_full(sq("a2")));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut board = Board::startpos();
        let before = board.clone();
        board.clear_square(sq("e4"));
        assert_eq!(board, before);

        board.clear_square(sq("e2"));
        let once = board.clone();
        board.clear_square(sq("e2"));
        assert_eq!(board, once);
    }

    #[test]
    fn move_to_empty_square() {
        let mut board = Board::startpos();
        let before = board.clone();
        board.move_piece(sq("g1"), sq("f3"));
        assert_eq!(board.piece_label_at(sq("g1")), EMPTY_LABEL);
        assert_eq!(board.piece_label_at(sq("f3")), 'N');
        for s in Square::all().filter(|&s| s != sq("g1") && s != sq("f3")) {
            assert_eq!(board.piece_at(s), before.piece_at(s), "{s}");
        }
    }

    #[test]
    fn move_from_empty_square_is_noop() {
        let mut board = Board::startpos();
        let before = board.clone();
        board.move_piece(sq("e4"), sq("e5"));
        assert_eq!(board, before);
    }

    #[test]
    fn move_onto_itself_keeps_piece() {
        let mut board = Board::startpos();
        let before = board.clone();
        board.move_piece(sq("d1"), sq("d1"));
        assert_eq!(board, before);
    }

    #[test]
    fn capture_is_unconditional() {
        let mut board = Board::startpos();
        // Own piece.
        board.move_piece(sq("a1"), sq("a2"));
        assert_eq!(board.piece_label_at(sq("a2")), 'R');
        assert_eq!(board.piece_label_at(sq("a1")), EMPTY_LABEL);
        // Opposing piece, across the board.
        board.move_piece(sq("a2"), sq("d8"));
        assert_eq!(board.piece_label_at(sq("d8")), 'R');
        assert!(board
            .pieces(PieceKind::new(Color::Black, Piece::Queen))
            .is_empty());
        assert_eq!(board.all_full_squares().count(), 30);
        assert_disjoint(&board);
    }

    #[test]
    fn process_move_checks_notation_first() {
        let mut board = Board::startpos();
        let before = board.clone();
        assert_eq!(
            board.process_move("e2", "e9", Color::White),
            Err(MoveError::InvalidNotation)
        );
        assert_eq!(
            board.process_move("x4", "e3", Color::Black),
            Err(MoveError::InvalidNotation)
        );
        assert_eq!(
            board.process_move("e4 ", "e5", Color::White),
            Err(MoveError::InvalidNotation)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn process_move_rejects_empty_origin() {
        let mut board = Board::startpos();
        let err = board.process_move("E4", "e5", Color::White).unwrap_err();
        assert_eq!(err, MoveError::EmptySquare("E4".to_string()));
        assert_eq!(err.to_string(), "No piece at E4.");
    }

    #[test]
    fn process_move_enforces_turn() {
        let mut board = Board::startpos();
        let before = board.clone();

        let err = board.process_move("e7", "e5", Color::White).unwrap_err();
        assert_eq!(err, MoveError::WrongTurn(Color::White));
        assert_eq!(err.to_string(), "It's White's turn. Move a white piece.");
        assert_eq!(board, before);

        let err = board.process_move("e2", "e4", Color::Black).unwrap_err();
        assert_eq!(err.to_string(), "It's Black's turn. Move a black piece.");
        assert_eq!(board, before);

        assert_eq!(board.process_move("e2", "e4", Color::White), Ok(()));
    }

    #[test]
    fn opening_exchange() {
        let mut board = Board::startpos();
        let initial = board.clone();
        board.process_move("e2", "e4", Color::White).unwrap();
        board.process_move("e7", "e5", Color::Black).unwrap();

        assert_eq!(board.piece_label_at(sq("e4")), 'P');
        assert_eq!(board.piece_label_at(sq("e2")), EMPTY_LABEL);
        assert_eq!(board.piece_label_at(sq("e5")), 'p');
        assert_eq!(board.piece_label_at(sq("e7")), EMPTY_LABEL);
        let touched = [sq("e2"), sq("e4"), sq("e5"), sq("e7")];
        for s in Square::all().filter(|s| !touched.contains(s)) {
            assert_eq!(board.piece_at(s), initial.piece_at(s), "{s}");
        }
    }

    #[test]
    fn ignores_movement_rules() {
        let mut board = Board::startpos();
        // Rook straight through its own pawns onto the enemy king.
        assert_eq!(board.process_move("a1", "e8", Color::White), Ok(()));
        assert_eq!(board.piece_label_at(sq("e8")), 'R');
        assert!(board
            .pieces(PieceKind::new(Color::Black, Piece::King))
            .is_empty());
    }

    #[test]
    fn from_setup_uses_placement() {
        let setup = Setup::parse("4k3/8/8/8/8/8/8/4K2R w").unwrap();
        let board = Board::from_setup(&setup);
        assert_eq!(board.all_full_squares().count(), 3);
        assert_eq!(board.piece_label_at(sq("h1")), 'R');
        assert_eq!(board.to_fen_placement(), "4k3/8/8/8/8/8/8/4K2R");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Clear(u8),
        Set(u8, char),
        Move(u8, u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let label = prop::sample::select(vec![
            'K', 'Q', 'R', 'B', 'N', 'P', 'k', 'q', 'r', 'b', 'n', 'p', '-', 'x',
        ]);
        prop_oneof![
            (0u8..64).prop_map(Op::Clear),
            (0u8..64, label).prop_map(|(s, l)| Op::Set(s, l)),
            (0u8..64, 0u8..64).prop_map(|(f, t)| Op::Move(f, t)),
        ]
    }

    proptest! {
        #[test]
        fn masks_stay_disjoint(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut board = Board::startpos();
            for op in ops {
                match op {
                    Op::Clear(s) => board.clear_square(Square::from_index(s).unwrap()),
                    Op::Set(s, l) => board.set_square(Square::from_index(s).unwrap(), l),
                    Op::Move(f, t) => board.move_piece(
                        Square::from_index(f).unwrap(),
                        Square::from_index(t).unwrap(),
                    ),
                }
                let total: u32 = PieceKind::ALL.iter().map(|&k| board.pieces(k).count()).sum();
                prop_assert_eq!(total, board.all_full_squares().count());
            }
        }

        #[test]
        fn move_preserves_identity(from in 0u8..64, to in 0u8..64) {
            let mut board = Board::startpos();
            let from = Square::from_index(from).unwrap();
            let to = Square::from_index(to).unwrap();
            let moving = board.piece_at(from);
            let before = board.clone();

            board.move_piece(from, to);

            match moving {
                Some(kind) => {
                    prop_assert_eq!(board.piece_at(to), Some(kind));
                    if from != to {
                        prop_assert_eq!(board.piece_at(from), None);
                    }
                    for s in Square::all().filter(|&s| s != from && s != to) {
                        prop_assert_eq!(board.piece_at(s), before.piece_at(s));
                    }
                }
                None => prop_assert_eq!(&board, &before),
            }
        }
    }
}
