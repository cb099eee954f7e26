//! The position-tracked cursor over the zone file text.
//!
//! [`CharStream`] is the only view the tokenizer and the record parser have
//! of the input: a forward-only position over the raw bytes with single-step
//! advance, end-of-input tests, and bulk whitespace skipping. It also keeps
//! the line bookkeeping needed to attach a position and a line snippet to a
//! [`SyntaxError`].
//!
//! The grammar never requires backtracking, so there is no way to move the
//! position backwards.

use crate::error::SyntaxError;
use crate::token::ScannedString;
use bytes::Bytes;
use octseq::str::Str;

//------------ Character classes ---------------------------------------------

/// Returns whether `ch` is an ASCII letter.
pub fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

/// Returns whether `ch` is an ASCII digit.
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Returns whether `ch` is horizontal white space, i.e., space or tab.
pub fn is_horizontal_space(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t')
}

/// Returns whether `ch` is vertical white space, i.e., LF or CR.
pub fn is_vertical_space(ch: u8) -> bool {
    matches!(ch, b'\n' | b'\r')
}

/// Returns whether `ch` is any white space.
pub fn is_space(ch: u8) -> bool {
    is_horizontal_space(ch) || is_vertical_space(ch)
}

/// Returns whether `ch` may appear in a name or directive value.
///
/// These are the characters allowed in owner names and in the values of
/// `$ORIGIN` and `$TTL`: letters, digits, underscore, dot, hyphen, `@`,
/// and `*`.
pub fn is_word_char(ch: u8) -> bool {
    is_letter(ch)
        || is_digit(ch)
        || matches!(ch, b'_' | b'.' | b'-' | b'@' | b'*')
}

//------------ CharStream ----------------------------------------------------

/// A forward-only cursor over zone file text.
#[derive(Clone, Debug)]
pub struct CharStream {
    /// The input.
    buf: Bytes,

    /// The position of the current character in `buf`.
    pos: usize,

    /// The line number of the current line, starting at 1.
    line_num: usize,

    /// The position of the first character of the current line.
    line_start: usize,
}

impl CharStream {
    /// Creates a new stream over the given text.
    pub fn new(text: &str) -> Self {
        Self::with_buf(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Creates a stream from a buffer known to hold valid UTF-8.
    fn with_buf(buf: Bytes) -> Self {
        CharStream {
            buf,
            pos: 0,
            line_num: 1,
            line_start: 0,
        }
    }

    /// Returns the current character or `None` at the end of input.
    pub fn current(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Returns whether the end of input has been reached.
    pub fn is_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Advances the position by one character.
    ///
    /// Does nothing at the end of input.
    pub fn advance(&mut self) {
        if let Some(ch) = self.current() {
            self.pos += 1;
            if ch == b'\n' {
                self.line_num += 1;
                self.line_start = self.pos;
            }
        }
    }

    /// Skips over any white space, horizontal or vertical.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(ch) if is_space(ch)) {
            self.advance();
        }
    }

    /// Skips over horizontal white space only.
    pub fn skip_horizontal_whitespace(&mut self) {
        while matches!(self.current(), Some(ch) if is_horizontal_space(ch)) {
            self.advance();
        }
    }

    /// Returns whether anything precedes the position on the current line.
    ///
    /// The tokenizer only consults this right after skipping white space,
    /// when everything preceding the position on the line is necessarily
    /// white space. A record starting at an indented position has no
    /// explicit owner name.
    pub fn has_space(&self) -> bool {
        self.pos > self.line_start
    }

    /// Returns the current position as a byte offset into the input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the text from `start` up to the current position.
    ///
    /// # Panics
    ///
    /// Panics if `start` lies past the current position.
    pub(crate) fn token_str(&self, start: usize) -> ScannedString {
        let octets = self.buf.slice(start..self.pos);
        // The input is valid UTF-8 and scanning only ever stops on ASCII
        // delimiters, so every slice taken here is valid UTF-8, too.
        unsafe { Str::from_utf8_unchecked(octets) }
    }

    /// Creates a syntax error at the current position.
    pub fn error(&self, msg: &'static str) -> SyntaxError {
        SyntaxError::new(
            msg,
            self.line_num,
            self.pos - self.line_start + 1,
            self.line_snippet(),
        )
    }

    /// Returns the text of the current line for error context.
    ///
    /// Longer lines are truncated.
    fn line_snippet(&self) -> Box<str> {
        const MAX_SNIPPET: usize = 60;
        let end = self.buf[self.line_start..]
            .iter()
            .position(|&ch| ch == b'\n')
            .map_or(self.buf.len(), |pos| self.line_start + pos);
        let line = String::from_utf8_lossy(&self.buf[self.line_start..end]);
        let line = line.trim_end_matches('\r');
        match line.char_indices().nth(MAX_SNIPPET) {
            Some((idx, _)) => line[..idx].into(),
            None => line.into(),
        }
    }
}

impl From<&str> for CharStream {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for CharStream {
    fn from(text: String) -> Self {
        Self::with_buf(Bytes::from(text.into_bytes()))
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn advance_and_end() {
        let mut stream = CharStream::new("ab");
        assert_eq!(stream.current(), Some(b'a'));
        stream.advance();
        assert_eq!(stream.current(), Some(b'b'));
        stream.advance();
        assert!(stream.is_end());
        assert_eq!(stream.current(), None);
        stream.advance();
        assert!(stream.is_end());
    }

    #[test]
    fn skip_whitespace() {
        let mut stream = CharStream::new(" \t\r\n  x");
        stream.skip_whitespace();
        assert_eq!(stream.current(), Some(b'x'));

        let mut stream = CharStream::new(" \t\nx");
        stream.skip_horizontal_whitespace();
        assert_eq!(stream.current(), Some(b'\n'));
    }

    #[test]
    fn has_space() {
        let mut stream = CharStream::new("a\n  b");
        assert!(!stream.has_space());
        stream.advance();
        stream.skip_whitespace();
        assert_eq!(stream.current(), Some(b'b'));
        assert!(stream.has_space());
        let mut stream = CharStream::new("a\nb");
        stream.advance();
        stream.skip_whitespace();
        assert!(!stream.has_space());
    }

    #[test]
    fn error_position() {
        let mut stream = CharStream::new("one\ntwo three");
        while stream.current() != Some(b't') {
            stream.advance();
        }
        stream.advance();
        let err = stream.error("boom");
        assert_eq!(err.line(), 2);
        assert_eq!(err.col(), 2);
        assert_eq!(err.context(), "two three");
    }

    #[test]
    fn token_str() {
        let mut stream = CharStream::new("hello world");
        let start = stream.pos();
        while matches!(stream.current(), Some(ch) if is_letter(ch)) {
            stream.advance();
        }
        assert_eq!(&stream.token_str(start)[..], "hello");
    }

    #[test]
    fn word_chars() {
        for ch in b"aZ09_.-@*".iter() {
            assert!(is_word_char(*ch));
        }
        for ch in b" \t\n;#()\"!".iter() {
            assert!(!is_word_char(*ch));
        }
    }
}
