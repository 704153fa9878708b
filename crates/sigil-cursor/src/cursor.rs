//! Character cursor over a byte stream.

use std::io::{self, BufReader, ErrorKind, Read};

use sigil_ast::Position;

use crate::error::CursorError;

/// Reads characters one at a time from an underlying stream.
///
/// Holds at most one pushed-back character. Reading it again goes through
/// the same position bookkeeping as a fresh read, and pushing back restores
/// the exact position from before the read, so a pushed-back newline does
/// not count twice.
pub struct Cursor<R> {
    inner: BufReader<R>,
    position: Position,
    /// Character waiting to be returned by the next `next()`
    pending: Option<char>,
    /// Last character returned and the position before it was read
    last: Option<(char, Position)>,
}

impl<R: Read> Cursor<R> {
    /// Create a cursor positioned at line 1, column 0.
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            position: Position::start(),
            pending: None,
            last: None,
        }
    }

    /// Current line/column.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Return the next character.
    ///
    /// Fails with [`CursorError::EndOfInput`] once the stream is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<char, CursorError> {
        let c = match self.pending.take() {
            Some(c) => c,
            None => self.decode()?,
        };

        let before = self.position;
        self.position = before.advance(c);
        self.last = Some((c, before));
        Ok(c)
    }

    /// Make the next `next()` return the most recently read character again.
    ///
    /// Only one character can be pushed back between reads.
    pub fn pushback(&mut self) -> Result<(), CursorError> {
        let (c, before) = self.last.take().ok_or(CursorError::PushbackUnavailable)?;
        self.pending = Some(c);
        self.position = before;
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Decode one UTF-8 code point from the stream.
    fn decode(&mut self) -> Result<char, CursorError> {
        let first = self.read_byte()?.ok_or(CursorError::EndOfInput)?;

        let width = match first {
            0x00..=0x7F => return Ok(char::from(first)),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(invalid_utf8(self.position)),
        };

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .read_byte()?
                .ok_or_else(|| invalid_utf8(self.position))?;
        }

        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| invalid_utf8(self.position))
    }
}

fn invalid_utf8(position: Position) -> CursorError {
    CursorError::Io(io::Error::new(
        ErrorKind::InvalidData,
        format!("invalid UTF-8 after {}", position),
    ))
}
