//! Record tokens.
//!
//! A [`Token`] is the structured result of parsing one resource record: an
//! append-only, ordered keyed mapping that is guaranteed to carry a `NAME`
//! entry. The tokenizer treats tokens as opaque beyond that entry; the keys
//! beyond `NAME` are the record parser's contract.

use bytes::Bytes;
use core::fmt;
use octseq::str::Str;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

//------------ Type Aliases --------------------------------------------------

/// The type used for strings sliced out of the input.
pub type ScannedString = Str<Bytes>;

/// The ordered sequence of tokens produced from one zone file.
pub type TokenSequence = Vec<Token>;

//------------ TokenKey ------------------------------------------------------

/// The keys that may appear in a token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKey {
    /// The record's owner name, explicit or inherited.
    Name,

    /// The `$ORIGIN` in effect when the record was parsed.
    Origin,

    /// The record's TTL, explicit or taken from `$TTL`.
    Ttl,

    /// The record's class, only present when explicit.
    Class,

    /// The record type.
    Rtype,

    /// The record data fields.
    Rdata,
}

impl TokenKey {
    /// Returns the key's name as it appears in serialized tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKey::Name => "NAME",
            TokenKey::Origin => "ORIGIN",
            TokenKey::Ttl => "TTL",
            TokenKey::Class => "CLASS",
            TokenKey::Rtype => "TYPE",
            TokenKey::Rdata => "RDATA",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//------------ TokenValue ----------------------------------------------------

/// The value of a single token entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenValue {
    /// A single string value.
    Single(ScannedString),

    /// A list of string values, used for record data.
    List(Vec<ScannedString>),
}

impl TokenValue {
    /// Returns the value as a string if it is a single value.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            TokenValue::Single(value) => Some(value),
            TokenValue::List(_) => None,
        }
    }

    /// Returns the value as a slice if it is a list value.
    pub fn as_list(&self) -> Option<&[ScannedString]> {
        match self {
            TokenValue::Single(_) => None,
            TokenValue::List(values) => Some(values),
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenValue::Single(value) => f.write_str(value),
            TokenValue::List(values) => {
                let mut first = true;
                for value in values {
                    if !first {
                        f.write_str(" ")?;
                    }
                    f.write_str(value)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

//------------ Token ---------------------------------------------------------

/// The structured result of parsing one resource record.
///
/// Entries keep their insertion order and can only ever be appended, so the
/// `NAME` entry passed to the constructor stays the first entry for the
/// token's entire life. Serializing a token produces an ordered map.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// The entries in insertion order.
    entries: Vec<(TokenKey, TokenValue)>,
}

impl Token {
    /// Creates a new token with the given owner name.
    pub(crate) fn new(name: ScannedString) -> Self {
        Token {
            entries: vec![(TokenKey::Name, TokenValue::Single(name))],
        }
    }

    /// Appends an entry to the token.
    pub(crate) fn push(&mut self, key: TokenKey, value: TokenValue) {
        self.entries.push((key, value));
    }

    /// Returns the record's owner name.
    pub fn name(&self) -> &ScannedString {
        match self.entries.first() {
            Some((TokenKey::Name, TokenValue::Single(name))) => name,
            _ => unreachable!("token without NAME entry"),
        }
    }

    /// Returns the value for the given key if present.
    pub fn get(&self, key: TokenKey) -> Option<&TokenValue> {
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, value)| value)
    }

    /// Returns the single string value for the given key if present.
    pub fn text(&self, key: TokenKey) -> Option<&str> {
        self.get(key).and_then(TokenValue::as_single)
    }

    /// Returns the record data fields if present.
    pub fn rdata(&self) -> Option<&[ScannedString]> {
        self.get(TokenKey::Rdata).and_then(TokenValue::as_list)
    }

    /// Returns an iterator over the entries in insertion order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (TokenKey, &TokenValue)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Returns the number of entries in the token.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the token has no entries.
    ///
    /// This is never the case for tokens produced by the tokenizer.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            match value {
                TokenValue::Single(value) => {
                    map.serialize_entry(key.as_str(), &value[..])?;
                }
                TokenValue::List(values) => {
                    let values: Vec<&str> =
                        values.iter().map(|value| &value[..]).collect();
                    map.serialize_entry(key.as_str(), &values)?;
                }
            }
        }
        map.end()
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn scanned(value: &str) -> ScannedString {
        // Test data is always valid UTF-8.
        unsafe {
            Str::from_utf8_unchecked(Bytes::copy_from_slice(
                value.as_bytes(),
            ))
        }
    }

    #[test]
    fn insertion_order() {
        let mut token = Token::new(scanned("www"));
        token.push(TokenKey::Rtype, TokenValue::Single(scanned("A")));
        token.push(
            TokenKey::Rdata,
            TokenValue::List(vec![scanned("1.2.3.4")]),
        );
        let keys: Vec<_> = token.iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            [TokenKey::Name, TokenKey::Rtype, TokenKey::Rdata]
        );
        assert_eq!(token.len(), 3);
        assert_eq!(&token.name()[..], "www");
        assert_eq!(token.text(TokenKey::Rtype), Some("A"));
        assert_eq!(token.text(TokenKey::Ttl), None);
        assert_eq!(token.rdata().map(|rdata| rdata.len()), Some(1));
    }

    #[test]
    fn serialize_ordered_map() {
        let mut token = Token::new(scanned("www"));
        token.push(TokenKey::Ttl, TokenValue::Single(scanned("3600")));
        token.push(
            TokenKey::Rdata,
            TokenValue::List(vec![scanned("a"), scanned("b")]),
        );
        let yaml = serde_yaml::to_string(&token).unwrap();
        assert_eq!(yaml, "NAME: www\nTTL: '3600'\nRDATA:\n- a\n- b\n");
    }
}
