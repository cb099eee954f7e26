//! The zone file tokenizer.
//!
//! [`Tokenizer`] runs the top-level scan over the input: it classifies each
//! position as a global variable directive, a comment, or a record, keeps
//! the `$ORIGIN` and `$TTL` state, and collects the record tokens into the
//! output sequence. Everything record-shaped is handed to
//! [`RecordParser`][crate::record::RecordParser].

use crate::error::SyntaxError;
use crate::record::RecordParser;
use crate::stream::{self, CharStream};
use crate::token::{ScannedString, TokenSequence};

//------------ Tokenizer -----------------------------------------------------

/// A single-use tokenizer for one zone file.
///
/// A tokenizer is constructed with the input text, driven to completion by
/// [`tokenize`][Self::tokenize], and discarded. All state, including the
/// globals set by `$ORIGIN` and `$TTL` directives, lives for exactly one
/// call; nothing carries over between inputs.
pub struct Tokenizer {
    /// The cursor over the input.
    stream: CharStream,

    /// The origin set by the most recent `$ORIGIN` directive.
    origin: Option<ScannedString>,

    /// The default TTL set by the most recent `$TTL` directive.
    ttl: Option<ScannedString>,

    /// The number of records extracted so far.
    records: usize,

    /// The tokens produced so far.
    tokens: TokenSequence,
}

impl Tokenizer {
    /// Tokenizes the given zone file text.
    ///
    /// Returns the ordered sequence of record tokens, one per record in
    /// file order, or the first syntax error encountered. There is no
    /// partial result: a file either tokenizes completely or not at all.
    pub fn tokenize(text: &str) -> Result<TokenSequence, SyntaxError> {
        Self::new(text).run()
    }

    /// Creates a tokenizer over the given text.
    fn new(text: &str) -> Self {
        Tokenizer {
            stream: CharStream::new(text),
            origin: None,
            ttl: None,
            records: 0,
            tokens: Vec::new(),
        }
    }

    /// Runs the top-level scan loop.
    ///
    /// Each round skips white space and then dispatches on the current
    /// character: `$` starts a directive, `;` a comment, and anything else
    /// a record. The end-of-input check sits at the bottom so an empty or
    /// all-white-space input falls through cleanly.
    fn run(mut self) -> Result<TokenSequence, SyntaxError> {
        loop {
            self.stream.skip_whitespace();
            match self.stream.current() {
                Some(b'$') => {
                    self.stream.advance();
                    self.scan_directive()?;
                }
                Some(b';') => self.skip_comment(),
                Some(_) => {
                    self.scan_record()?;
                    self.stream.skip_whitespace();
                }
                None => {}
            }
            if self.stream.is_end() {
                return Ok(self.tokens);
            }
        }
    }

    /// Scans a global variable directive.
    ///
    /// The `$` has already been consumed. The name consists of letters
    /// only, must be terminated by horizontal white space, and is matched
    /// case-insensitively against the two variables a zone file may set,
    /// `origin` and `ttl`.
    fn scan_directive(&mut self) -> Result<(), SyntaxError> {
        let start = self.stream.pos();
        while matches!(
            self.stream.current(), Some(ch) if stream::is_letter(ch)
        ) {
            self.stream.advance();
        }
        match self.stream.current() {
            Some(ch) if stream::is_horizontal_space(ch) => {}
            _ => {
                return Err(self.stream.error("malformed global variable"))
            }
        }
        let name = self.stream.token_str(start).to_ascii_lowercase();
        match name.as_str() {
            "origin" | "ttl" => {}
            _ => return Err(self.stream.error("unknown global variable")),
        }
        self.stream.skip_horizontal_whitespace();
        let value = self.scan_directive_value()?;
        #[cfg(feature = "tracing")]
        tracing::trace!(name = %name, value = %value, "global variable set");
        match name.as_str() {
            "origin" => self.origin = Some(value),
            _ => self.ttl = Some(value),
        }
        Ok(())
    }

    /// Scans the value of a global variable directive.
    ///
    /// The value may contain letters, digits, underscores, dots, hyphens,
    /// `@`, and `*`, and ends at the first white space character. Whether
    /// the value makes sense as an origin or a TTL is not checked here;
    /// that is the business of whoever consumes the tokens.
    fn scan_directive_value(
        &mut self,
    ) -> Result<ScannedString, SyntaxError> {
        let start = self.stream.pos();
        loop {
            match self.stream.current() {
                Some(ch) if stream::is_word_char(ch) => {
                    self.stream.advance()
                }
                Some(ch) if stream::is_space(ch) => {
                    return Ok(self.stream.token_str(start))
                }
                Some(_) => {
                    return Err(
                        self.stream.error("bad global variable value")
                    )
                }
                None => {
                    return Err(self.stream.error("unexpected end of data"))
                }
            }
        }
    }

    /// Skips a comment running to the end of the line.
    ///
    /// The line feed itself stays on the stream. Comments produce nothing,
    /// change nothing, and cannot fail.
    fn skip_comment(&mut self) {
        while matches!(
            self.stream.current(),
            Some(ch) if !stream::is_vertical_space(ch)
        ) {
            self.stream.advance();
        }
    }

    /// Extracts a single record.
    ///
    /// The previous owner name handed to the record parser is always read
    /// off the last token in the output sequence, so it can never get out
    /// of step with what was actually emitted.
    fn scan_record(&mut self) -> Result<(), SyntaxError> {
        let is_first = self.records == 0;
        let previous_name = if is_first {
            None
        } else {
            self.tokens.last().map(|token| token.name().clone())
        };
        let token = RecordParser::new(
            &mut self.stream,
            self.origin.clone(),
            self.ttl.clone(),
            is_first,
            previous_name,
        )
        .parse()?;
        #[cfg(feature = "tracing")]
        tracing::trace!(name = %token.name(), "record extracted");
        self.tokens.push(token);
        self.records += 1;
        Ok(())
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::TokenKey;

    #[test]
    fn empty_and_blank_input() {
        assert!(Tokenizer::tokenize("").unwrap().is_empty());
        assert!(Tokenizer::tokenize("   \t\n\r\n  \n").unwrap().is_empty());
    }

    #[test]
    fn comment_only_input() {
        assert!(Tokenizer::tokenize("; comment only\n").unwrap().is_empty());
        assert!(Tokenizer::tokenize("; one\n  ; two\n; three")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn comments_change_nothing() {
        // A comment that looks like a directive or record must not leak
        // into the state or the output.
        let tokens = Tokenizer::tokenize(
            "; $ORIGIN sneaky.example.\n; www IN A 9.9.9.9\n\
             www IN A 1.2.3.4\n",
        )
        .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].get(TokenKey::Origin), None);
        assert_eq!(&tokens[0].name()[..], "www");
    }

    #[test]
    fn directives_flow_into_records() {
        let tokens = Tokenizer::tokenize(
            "$ORIGIN example.com.\n$TTL 3600\n\
             www IN A 1.2.3.4\n  IN A 5.6.7.8\n",
        )
        .unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(&tokens[0].name()[..], "www");
        assert_eq!(&tokens[1].name()[..], "www");
        for token in &tokens {
            assert_eq!(token.text(TokenKey::Origin), Some("example.com."));
            assert_eq!(token.text(TokenKey::Ttl), Some("3600"));
        }
    }

    #[test]
    fn directive_override() {
        let tokens = Tokenizer::tokenize(
            "$TTL 60\nwww IN A 1.2.3.4\n$TTL 120\nmail IN A 5.6.7.8\n",
        )
        .unwrap();
        assert_eq!(tokens[0].text(TokenKey::Ttl), Some("60"));
        assert_eq!(tokens[1].text(TokenKey::Ttl), Some("120"));
    }

    #[test]
    fn trailing_directive_has_no_effect() {
        let tokens =
            Tokenizer::tokenize("www IN A 1.2.3.4\n$TTL 60\n").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].get(TokenKey::Ttl), None);
    }

    #[test]
    fn directive_names_are_case_insensitive() {
        for text in [
            "$ORIGIN example.com.\nwww IN A 1.2.3.4\n",
            "$Origin example.com.\nwww IN A 1.2.3.4\n",
            "$origin example.com.\nwww IN A 1.2.3.4\n",
        ] {
            let tokens = Tokenizer::tokenize(text).unwrap();
            assert_eq!(
                tokens[0].text(TokenKey::Origin),
                Some("example.com.")
            );
        }
    }

    #[test]
    fn unknown_directive() {
        let err = Tokenizer::tokenize("$FOOBAR x\n").unwrap_err();
        assert_eq!(err.message(), "unknown global variable");
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn malformed_directive_name() {
        // A digit in the name, a line feed right after it, and a name
        // running into the end of input all violate the grammar.
        for text in ["$TTL2 3600\n", "$TTL\n3600\n", "$TTL", "$"] {
            let err = Tokenizer::tokenize(text).unwrap_err();
            assert_eq!(err.message(), "malformed global variable");
        }
    }

    #[test]
    fn bad_directive_value() {
        let err =
            Tokenizer::tokenize("$ORIGIN ex#ample.com\n").unwrap_err();
        assert_eq!(err.message(), "bad global variable value");
    }

    #[test]
    fn directive_value_at_end_of_input() {
        let err = Tokenizer::tokenize("$TTL 3600").unwrap_err();
        assert_eq!(err.message(), "unexpected end of data");
    }

    #[test]
    fn empty_directive_value() {
        // Nothing but white space after the name: the empty value is
        // stored verbatim. Validation is the consumer's job.
        let tokens =
            Tokenizer::tokenize("$TTL \nwww IN A 1.2.3.4\n").unwrap();
        assert_eq!(tokens[0].text(TokenKey::Ttl), Some(""));
    }

    #[test]
    fn name_inherited_from_last_token() {
        // The inherited name must come from the immediately preceding
        // token, not from an earlier one.
        let tokens = Tokenizer::tokenize(
            "www IN A 1.2.3.4\nmail IN A 5.6.7.8\n  IN A 9.9.9.9\n",
        )
        .unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(&tokens[2].name()[..], "mail");
    }

    #[test]
    fn first_record_must_have_a_name() {
        let err = Tokenizer::tokenize("  IN A 1.2.3.4\n").unwrap_err();
        assert_eq!(err.message(), "first record requires an owner name");
    }

    #[test]
    fn error_reports_first_violation() {
        // The second bad line is never reached.
        let err = Tokenizer::tokenize(
            "www IN A 1.2.3.4\n$FOO x\n$BAR y\n",
        )
        .unwrap_err();
        assert_eq!(err.message(), "unknown global variable");
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn record_error_aborts_without_tokens() {
        assert!(Tokenizer::tokenize("$FOOBAR x\nwww IN A 1.2.3.4\n")
            .is_err());
    }
}
