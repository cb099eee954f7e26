//! A tokenizer for DNS zone files.
//!
//! This crate takes the text of a zone file – the standard master file
//! format listing a DNS zone's resource records – and turns it into an
//! ordered sequence of structured record tokens, ready for validation or
//! for loading into a name server. It deliberately stops there: record data
//! is split into fields but not interpreted, `$INCLUDE` files are not
//! resolved, and no wire-format encoding or I/O happens here.
//!
//! The entry point is [`Tokenizer::tokenize`]:
//!
//! ```
//! use zonescan::{TokenKey, Tokenizer};
//!
//! let tokens = Tokenizer::tokenize(
//!     "$ORIGIN example.com.\n$TTL 3600\nwww IN A 1.2.3.4\n",
//! ).unwrap();
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(&tokens[0].name()[..], "www");
//! assert_eq!(tokens[0].text(TokenKey::Ttl), Some("3600"));
//! ```
//!
//! A zone file either tokenizes completely or the call fails with the
//! [`SyntaxError`] for the first grammar violation in file order; there are
//! no partial results.
//!
//! # Modules
//!
//! * [tokenizer] holds the top-level scanner driving everything,
//! * [record] parses a single resource record into a token,
//! * [stream] is the position-tracked cursor over the input,
//! * [token] defines the produced tokens, and
//! * [error] the error type.
//!
//! # Feature flags
//!
//! * `tracing`: emits trace-level events through the
//!   [tracing](https://github.com/tokio-rs/tracing) crate whenever a
//!   directive updates the global state or a record token is produced.

pub mod error;
pub mod record;
pub mod stream;
pub mod token;
pub mod tokenizer;

pub use self::error::SyntaxError;
pub use self::token::{
    ScannedString, Token, TokenKey, TokenSequence, TokenValue,
};
pub use self::tokenizer::Tokenizer;
