//! Errors raised while tokenizing a zone file.

use core::fmt;

//------------ SyntaxError ---------------------------------------------------

/// A violation of the zone file grammar.
///
/// This is the only error kind the tokenizer produces. It is raised at the
/// exact point the grammar is violated and aborts the whole tokenize call;
/// there is no recovery and no partial result.
///
/// The error carries the position the cursor was at when the violation was
/// detected plus the text of the offending line so that callers can produce
/// a useful diagnostic. Values are created through
/// [`CharStream::error`][crate::stream::CharStream::error].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntaxError {
    /// A static description of the violation.
    msg: &'static str,

    /// The line the cursor was on, starting at 1.
    line: usize,

    /// The column the cursor was at, starting at 1.
    col: usize,

    /// The text of the line the error occurred on.
    context: Box<str>,
}

impl SyntaxError {
    /// Creates a new error from its parts.
    pub(crate) fn new(
        msg: &'static str,
        line: usize,
        col: usize,
        context: Box<str>,
    ) -> Self {
        SyntaxError {
            msg,
            line,
            col,
            context,
        }
    }

    /// Returns the description of the violation.
    pub fn message(&self) -> &'static str {
        self.msg
    }

    /// Returns the line number of the error, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the column of the error, starting at 1.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Returns the text of the line the error occurred on.
    ///
    /// The text may be truncated if the line is very long.
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.msg)?;
        if !self.context.is_empty() {
            write!(f, " near '{}'", self.context)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let err =
            SyntaxError::new("unknown global variable", 3, 2, "$FOO x".into());
        assert_eq!(
            format!("{}", err),
            "3:2: unknown global variable near '$FOO x'"
        );
        assert_eq!(err.line(), 3);
        assert_eq!(err.col(), 2);
        assert_eq!(err.context(), "$FOO x");
    }

    #[test]
    fn display_without_context() {
        let err = SyntaxError::new("unexpected end of data", 1, 1, "".into());
        assert_eq!(format!("{}", err), "1:1: unexpected end of data");
    }
}
