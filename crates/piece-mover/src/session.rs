//! The interactive read-eval loop.
//!
//! A [`Session`] owns the board and the side to move. Each round it draws
//! the board, prompts the player on move, reads one line holding two squares
//! (`e2 e4`) and hands them to [`Board::process_move`]. Refused input is
//! explained and the same player is asked again.

use std::io::{BufRead, Write};

use chess_board::Board;
use chess_core::Color;
use thiserror::Error;

/// Printed once before the first board.
pub const BANNER: &str = "\n    Welcome to Chess\nEnter moves in format 'e2 e4'\n\n";

/// Printed when a line does not hold two space-separated squares.
pub const FORMAT_ERROR: &str = "Invalid input format. Please use format like 'e2 e4'.";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why [`Session::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The input stream closed.
    EndOfInput,
    /// The configured number of moves was played.
    TurnLimit,
}

/// Splits an input line into origin and destination text.
///
/// The line terminator is dropped and runs of spaces collapse to one. The
/// line is cut at its first space, which must be neither the first nor the
/// last character. Everything after that space is the destination, so
/// `"e2 e4 e5"` yields `("e2", "e4 e5")` and fails later as bad notation.
pub fn split_move(line: &str) -> Option<(String, String)> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut normalized = String::with_capacity(line.len());
    for c in line.chars() {
        if c == ' ' && normalized.ends_with(' ') {
            continue;
        }
        normalized.push(c);
    }

    let space = normalized.find(' ')?;
    if space == 0 || space + 1 == normalized.len() {
        return None;
    }
    Some((
        normalized[..space].to_string(),
        normalized[space + 1..].to_string(),
    ))
}

/// One game of alternating moves over a line-oriented text stream.
pub struct Session<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    board: Board,
    side_to_move: Color,
    max_turns: Option<u32>,
    turns_played: u32,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, board: Board, side_to_move: Color) -> Self {
        Self {
            reader,
            writer,
            board,
            side_to_move,
            max_turns: None,
            turns_played: 0,
        }
    }

    /// Stops [`Session::run`] after `max_turns` applied moves. `None` plays
    /// until the input ends.
    pub fn with_max_turns(mut self, max_turns: Option<u32>) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Number of moves applied so far.
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    /// Consumes the session, returning the output stream.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Plays until the input ends or the turn limit is reached.
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        tracing::info!(
            side_to_move = %self.side_to_move,
            position = %self.board.to_fen_placement(),
            "session started"
        );
        self.writer.write_all(BANNER.as_bytes())?;

        loop {
            writeln!(self.writer)?;
            write!(self.writer, "{}", self.board)?;

            if self.max_turns.is_some_and(|max| self.turns_played >= max) {
                self.writer.flush()?;
                return Ok(SessionEnd::TurnLimit);
            }

            self.write_prompt()?;

            // Bytes that are not UTF-8 become U+FFFD and fail as bad notation.
            let mut buf = Vec::new();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                writeln!(self.writer)?;
                self.writer.flush()?;
                return Ok(SessionEnd::EndOfInput);
            }
            self.handle_line(&String::from_utf8_lossy(&buf))?;
        }
    }

    /// Processes one input line. Returns whether a move was applied.
    pub fn handle_line(&mut self, line: &str) -> Result<bool, SessionError> {
        let Some((from, to)) = split_move(line) else {
            tracing::debug!(line = line.trim_end(), "malformed input line");
            writeln!(self.writer, "{}", FORMAT_ERROR)?;
            return Ok(false);
        };

        match self.board.process_move(&from, &to, self.side_to_move) {
            Ok(()) => {
                self.turns_played += 1;
                self.side_to_move = self.side_to_move.opposite();
                tracing::debug!(
                    turn = self.turns_played,
                    position = %self.board.to_fen_placement(),
                    "move applied"
                );
                Ok(true)
            }
            Err(e) => {
                tracing::debug!(%from, %to, error = %e, "move refused");
                writeln!(self.writer, "{}", e)?;
                Ok(false)
            }
        }
    }

    fn write_prompt(&mut self) -> Result<(), SessionError> {
        let prompt = match self.side_to_move {
            Color::White => "White Move: ",
            Color::Black => "Black move: ",
        };
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;
    use std::io::Cursor;

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Board::startpos(),
            Color::White,
        )
    }

    fn output(session: Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.into_writer()).unwrap()
    }

    #[test]
    fn split_plain_line() {
        assert_eq!(
            split_move("e2 e4\n"),
            Some(("e2".to_string(), "e4".to_string()))
        );
        assert_eq!(
            split_move("e2 e4\r\n"),
            Some(("e2".to_string(), "e4".to_string()))
        );
    }

    #[test]
    fn split_collapses_space_runs() {
        assert_eq!(
            split_move("e2     e4"),
            Some(("e2".to_string(), "e4".to_string()))
        );
    }

    #[test]
    fn split_keeps_everything_after_first_space() {
        assert_eq!(
            split_move("e2 e4  e5"),
            Some(("e2".to_string(), "e4 e5".to_string()))
        );
    }

    #[test]
    fn split_rejects_missing_token() {
        for line in ["", "\n", "e2e4", " e2 e4", "  e2 e4", "e2 ", "e2   \n", " "] {
            assert_eq!(split_move(line), None, "{line:?}");
        }
    }

    #[test]
    fn split_does_not_trim_tabs() {
        assert_eq!(
            split_move("\te2 e4"),
            Some(("\te2".to_string(), "e4".to_string()))
        );
    }

    #[test]
    fn bad_format_keeps_turn() {
        let mut s = session("");
        assert!(!s.handle_line("e2e4\n").unwrap());
        assert_eq!(s.side_to_move(), Color::White);
        assert_eq!(output(s), format!("{}\n", FORMAT_ERROR));
    }

    #[test]
    fn refused_move_prints_reason() {
        let mut s = session("");
        assert!(!s.handle_line("e7 e5\n").unwrap());
        assert!(!s.handle_line("e3 e4\n").unwrap());
        assert!(!s.handle_line("e2 e9\n").unwrap());
        assert_eq!(s.turns_played(), 0);
        assert_eq!(
            output(s),
            "It's White's turn. Move a white piece.\nNo piece at e3.\nInvalid square notation.\n"
        );
    }

    #[test]
    fn accepted_move_alternates_turn() {
        let mut s = session("");
        assert!(s.handle_line("e2 e4\n").unwrap());
        assert_eq!(s.side_to_move(), Color::Black);
        assert!(s.handle_line("E7  E5\n").unwrap());
        assert_eq!(s.side_to_move(), Color::White);
        assert_eq!(s.turns_played(), 2);
        let e5 = Square::from_algebraic("e5").unwrap();
        assert_eq!(s.board().piece_label_at(e5), 'p');
    }

    #[test]
    fn run_stops_at_end_of_input() {
        let mut s = session("e2 e4\n");
        assert_eq!(s.run().unwrap(), SessionEnd::EndOfInput);
        assert_eq!(s.turns_played(), 1);
        let out = output(s);
        assert!(out.starts_with(BANNER));
        assert_eq!(out.matches("White Move: ").count(), 1);
        assert_eq!(out.matches("Black move: ").count(), 1);
    }

    #[test]
    fn run_stops_at_turn_limit() {
        let mut s = session("e2 e4\ne7 e5\nd2 d4\n").with_max_turns(Some(2));
        assert_eq!(s.run().unwrap(), SessionEnd::TurnLimit);
        assert_eq!(s.turns_played(), 2);
        assert_eq!(s.side_to_move(), Color::White);
        let d2 = Square::from_algebraic("d2").unwrap();
        assert_eq!(s.board().piece_label_at(d2), 'P');
    }

    #[test]
    fn zero_turn_limit_only_draws_board() {
        let mut s = session("e2 e4\n").with_max_turns(Some(0));
        assert_eq!(s.run().unwrap(), SessionEnd::TurnLimit);
        let out = output(s);
        assert_eq!(out, format!("{}\n{}", BANNER, Board::startpos()));
    }
}
