//! Character cursor for traversing source text.
//!
//! The cursor walks the source buffer one character at a time and keeps the
//! byte offset, line and column of the character under it. Once the last
//! character has been consumed it reports [`EOF_CHAR`] forever instead of
//! indexing past the buffer, so callers can read and advance at the end of
//! input without special-casing it.

use std::rc::Rc;

use crate::Position;

/// Sentinel returned by every read once the end of input is reached.
pub const EOF_CHAR: char = '\0';

/// A cursor over a source buffer.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use jsonnet_lexer::lexer::cursor::{Cursor, EOF_CHAR};
///
/// let mut cursor = Cursor::new("ab", Rc::new(String::from("shell")));
///
/// assert_eq!(cursor.advance(), 'a');
/// assert_eq!(cursor.current(), 'b');
/// assert_eq!(cursor.peek(), EOF_CHAR);
/// cursor.advance();
/// assert!(cursor.is_at_end());
/// assert_eq!(cursor.advance(), EOF_CHAR);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    position: Position,
    reached_end: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, file: Rc<String>) -> Self {
        Cursor {
            source,
            position: Position::new(file),
            reached_end: source.is_empty(),
        }
    }

    /// Character under the cursor, or [`EOF_CHAR`] at the end.
    pub fn current(&self) -> char {
        if self.reached_end {
            return EOF_CHAR;
        }

        self.remainder().chars().next().unwrap_or(EOF_CHAR)
    }

    /// Character after the one under the cursor, without moving.
    pub fn peek(&self) -> char {
        if self.reached_end {
            return EOF_CHAR;
        }

        let mut chars = self.remainder().chars();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    /// Returns the character under the cursor and moves past it.
    ///
    /// Does nothing and returns [`EOF_CHAR`] once the end has been reached.
    pub fn advance(&mut self) -> char {
        if self.reached_end {
            return EOF_CHAR;
        }

        let c = self.current();
        let width = c.len_utf8();
        self.position.offset += width;

        if c == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += width as u32;
        }

        if self.position.offset >= self.source.len() {
            self.reached_end = true;
        }

        c
    }

    /// Advances while `predicate` holds for the current character.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while !self.reached_end && predicate(self.current()) {
            self.advance();
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.reached_end
    }

    pub fn position(&self) -> Position {
        self.position.clone()
    }

    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// Unconsumed source, starting at the current character.
    pub fn remainder(&self) -> &'a str {
        &self.source[self.position.offset..]
    }

    /// Source text from `start` up to (excluding) the current character.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(source: &str) -> Cursor<'_> {
        Cursor::new(source, Rc::new(String::from("test.jsonnet")))
    }

    #[test]
    fn test_empty_source_starts_at_end() {
        let mut c = cursor("");
        assert!(c.is_at_end());
        assert_eq!(c.current(), EOF_CHAR);
        assert_eq!(c.peek(), EOF_CHAR);
        assert_eq!(c.advance(), EOF_CHAR);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_advance_returns_consumed_char() {
        let mut c = cursor("xyz");
        assert_eq!(c.advance(), 'x');
        assert_eq!(c.advance(), 'y');
        assert_eq!(c.current(), 'z');
        assert!(!c.is_at_end());
        assert_eq!(c.advance(), 'z');
        assert!(c.is_at_end());
    }

    #[test]
    fn test_peek_does_not_move() {
        let c = cursor("/*");
        assert_eq!(c.current(), '/');
        assert_eq!(c.peek(), '*');
        assert_eq!(c.peek(), '*');
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_end_is_sticky() {
        let mut c = cursor("a");
        c.advance();
        for _ in 0..5 {
            assert_eq!(c.advance(), EOF_CHAR);
        }
        assert_eq!(c.offset(), 1);
        assert_eq!(c.position().column, 1);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut c = cursor("ab\ncd\n\ne");
        c.advance();
        c.advance();
        assert_eq!((c.position().line, c.position().column), (0, 2));
        c.advance();
        assert_eq!((c.position().line, c.position().column), (1, 0));
        c.advance();
        assert_eq!((c.position().line, c.position().column), (1, 1));
        c.advance();
        c.advance();
        c.advance();
        assert_eq!((c.position().line, c.position().column), (3, 0));
        assert_eq!(c.current(), 'e');
    }

    #[test]
    fn test_column_counts_bytes() {
        let mut c = cursor("é!");
        assert_eq!(c.advance(), 'é');
        assert_eq!(c.offset(), 2);
        assert_eq!(c.position().column, 2);
        assert_eq!(c.current(), '!');
    }

    #[test]
    fn test_nul_in_source_is_not_end() {
        let c = cursor("\0");
        assert!(!c.is_at_end());
        assert_eq!(c.current(), '\0');
    }

    #[test]
    fn test_advance_while_and_slice() {
        let mut c = cursor("abc123 rest");
        let start = c.offset();
        c.advance_while(|ch| ch.is_alphanumeric());
        assert_eq!(c.slice_from(start), "abc123");
        assert_eq!(c.remainder(), " rest");
    }
}
