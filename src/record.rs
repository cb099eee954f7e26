//! Parsing a single resource record.
//!
//! The tokenizer hands off to [`RecordParser`] whenever the top-level scan
//! loop decides the cursor sits on a record. The parser consumes exactly one
//! record's worth of input, up to but not including the line feed that ends
//! it, and returns the record as a [`Token`].

use crate::error::SyntaxError;
use crate::stream::{self, CharStream};
use crate::token::{ScannedString, Token, TokenKey, TokenValue};
use bytes::BytesMut;
use octseq::str::Str;

/// The record classes recognized before the record type.
const CLASSES: [&str; 4] = ["IN", "CH", "HS", "CS"];

//------------ RecordParser --------------------------------------------------

/// A parser for a single resource record.
///
/// A value of this type is created for each record with a snapshot of the
/// global state: the origin and default TTL currently in effect, whether
/// this is the first record of the file, and the owner name of the previous
/// record for records that don't carry their own.
///
/// One record is one logical line: an optional owner name, an optional TTL
/// and class in either order, the record type, and at least one record data
/// field. Record data fields may be quoted, and an opening parenthesis
/// extends the logical line across line feeds until the matching closing
/// one. Comments may appear within and after the record data.
pub struct RecordParser<'a> {
    /// The stream, positioned at the start of the record.
    stream: &'a mut CharStream,

    /// The origin in effect for this record.
    origin: Option<ScannedString>,

    /// The default TTL in effect for this record.
    ttl: Option<ScannedString>,

    /// Whether this is the first record of the file.
    is_first: bool,

    /// The owner name of the previous record, if there was one.
    previous_name: Option<ScannedString>,

    /// How many unclosed opening parentheses have been seen.
    parens: usize,
}

impl<'a> RecordParser<'a> {
    /// Creates a new parser for a single record.
    pub fn new(
        stream: &'a mut CharStream,
        origin: Option<ScannedString>,
        ttl: Option<ScannedString>,
        is_first: bool,
        previous_name: Option<ScannedString>,
    ) -> Self {
        RecordParser {
            stream,
            origin,
            ttl,
            is_first,
            previous_name,
            parens: 0,
        }
    }

    /// Parses one record and returns its token.
    ///
    /// The stream is left at the line feed ending the record or at the end
    /// of input.
    pub fn parse(mut self) -> Result<Token, SyntaxError> {
        let owner = self.scan_owner()?;
        let (explicit_ttl, class, rtype) = self.scan_lead_fields()?;
        let rdata = self.scan_rdata()?;

        let mut token = Token::new(owner);
        if let Some(origin) = self.origin.take() {
            token.push(TokenKey::Origin, TokenValue::Single(origin));
        }
        if let Some(ttl) = explicit_ttl.or_else(|| self.ttl.take()) {
            token.push(TokenKey::Ttl, TokenValue::Single(ttl));
        }
        if let Some(class) = class {
            token.push(TokenKey::Class, TokenValue::Single(class));
        }
        token.push(TokenKey::Rtype, TokenValue::Single(rtype));
        token.push(TokenKey::Rdata, TokenValue::List(rdata));
        Ok(token)
    }

    /// Determines the record's owner name.
    ///
    /// A record starting at an indented position has no explicit owner and
    /// inherits the previous record's name; for the first record of the
    /// file there is nothing to inherit and this is an error. A bare `@`
    /// stands for the current origin.
    fn scan_owner(&mut self) -> Result<ScannedString, SyntaxError> {
        if self.stream.has_space() {
            return match self.previous_name.take() {
                Some(name) => Ok(name),
                None if self.is_first => Err(self
                    .stream
                    .error("first record requires an owner name")),
                None => Err(self.stream.error("missing owner name")),
            };
        }
        let start = self.stream.pos();
        while matches!(
            self.stream.current(), Some(ch) if stream::is_word_char(ch)
        ) {
            self.stream.advance();
        }
        if self.stream.pos() == start {
            return Err(self.stream.error("bad owner name"));
        }
        let owner = self.stream.token_str(start);
        if &owner[..] == "@" {
            match self.origin.clone() {
                Some(origin) => Ok(origin),
                None => Err(self.stream.error("@ owner without origin")),
            }
        } else {
            Ok(owner)
        }
    }

    /// Scans the optional TTL and class and the record type.
    ///
    /// TTL and class may appear in either order before the type, each at
    /// most once. A field of digits only is the TTL, a known class name is
    /// the class, and anything else has to be the record type.
    fn scan_lead_fields(
        &mut self,
    ) -> Result<
        (Option<ScannedString>, Option<ScannedString>, ScannedString),
        SyntaxError,
    > {
        let mut ttl = None;
        let mut class = None;
        loop {
            let field = match self.next_field()? {
                Some(Field::Word(word)) => word,
                Some(Field::Quoted(_)) | None => {
                    return Err(self.stream.error("expected record type"));
                }
            };
            if ttl.is_none()
                && field.bytes().all(|ch| ch.is_ascii_digit())
            {
                ttl = Some(field);
            } else if class.is_none()
                && CLASSES
                    .iter()
                    .any(|class| field.eq_ignore_ascii_case(class))
            {
                class = Some(field);
            } else if field.bytes().all(|ch| ch.is_ascii_alphanumeric()) {
                return Ok((ttl, class, field));
            } else {
                return Err(self.stream.error("expected record type"));
            }
        }
    }

    /// Scans the record data fields.
    ///
    /// At least one field is required.
    fn scan_rdata(&mut self) -> Result<Vec<ScannedString>, SyntaxError> {
        let mut rdata = Vec::new();
        while let Some(field) = self.next_field()? {
            rdata.push(field.into_value());
        }
        if rdata.is_empty() {
            return Err(self.stream.error("missing record data"));
        }
        Ok(rdata)
    }

    /// Returns the next field of the record, or `None` at its end.
    ///
    /// Skips white space and comments, keeps track of parentheses, and
    /// treats line feeds as the end of the record unless parentheses are
    /// open.
    fn next_field(&mut self) -> Result<Option<Field>, SyntaxError> {
        loop {
            self.stream.skip_horizontal_whitespace();
            match self.stream.current() {
                None => {
                    if self.parens > 0 {
                        return Err(
                            self.stream.error("unbalanced parentheses")
                        );
                    }
                    return Ok(None);
                }
                Some(ch) if stream::is_vertical_space(ch) => {
                    if self.parens == 0 {
                        return Ok(None);
                    }
                    self.stream.advance();
                }
                Some(b'(') => {
                    if self.parens > 0 {
                        return Err(self.stream.error("nested parentheses"));
                    }
                    self.parens += 1;
                    self.stream.advance();
                }
                Some(b')') => {
                    if self.parens == 0 {
                        return Err(
                            self.stream.error("unbalanced parentheses")
                        );
                    }
                    self.parens -= 1;
                    self.stream.advance();
                }
                Some(b';') => {
                    while matches!(
                        self.stream.current(),
                        Some(ch) if !stream::is_vertical_space(ch)
                    ) {
                        self.stream.advance();
                    }
                }
                Some(b'"') => return self.scan_quoted().map(Some),
                Some(_) => return Ok(Some(self.scan_word())),
            }
        }
    }

    /// Scans an unquoted field.
    ///
    /// The field runs until white space, a comment, a parenthesis, or a
    /// quote.
    fn scan_word(&mut self) -> Field {
        let start = self.stream.pos();
        while let Some(ch) = self.stream.current() {
            if stream::is_space(ch)
                || matches!(ch, b';' | b'(' | b')' | b'"')
            {
                break;
            }
            self.stream.advance();
        }
        Field::Word(self.stream.token_str(start))
    }

    /// Scans a quoted field.
    ///
    /// The quotes are stripped. A backslash makes the following character
    /// literal. Line feeds inside the quotes are part of the content.
    fn scan_quoted(&mut self) -> Result<Field, SyntaxError> {
        self.stream.advance();
        let mut content = BytesMut::new();
        loop {
            match self.stream.current() {
                None => {
                    return Err(self.stream.error("unterminated string"))
                }
                Some(b'"') => {
                    self.stream.advance();
                    // Escapes copy single bytes, but the continuation bytes
                    // of a multi-byte character come in through the arm
                    // below, so the collected bytes stay valid UTF-8.
                    let content =
                        unsafe { Str::from_utf8_unchecked(content.freeze()) };
                    return Ok(Field::Quoted(content));
                }
                Some(b'\\') => {
                    self.stream.advance();
                    match self.stream.current() {
                        Some(ch) => {
                            content.extend_from_slice(&[ch]);
                            self.stream.advance();
                        }
                        None => {
                            return Err(
                                self.stream.error("unterminated string")
                            );
                        }
                    }
                }
                Some(ch) => {
                    content.extend_from_slice(&[ch]);
                    self.stream.advance();
                }
            }
        }
    }
}

//------------ Field ---------------------------------------------------------

/// A single field of a record.
enum Field {
    /// An unquoted field.
    Word(ScannedString),

    /// A quoted field with the quotes stripped.
    Quoted(ScannedString),
}

impl Field {
    /// Returns the field's content.
    fn into_value(self) -> ScannedString {
        match self {
            Field::Word(value) | Field::Quoted(value) => value,
        }
    }
}

//============ Tests =========================================================
