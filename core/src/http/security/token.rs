//! Opaque credential token.

use std::fmt;

/// The credential presented by a request, as extracted by a
/// [`TokenParser`](crate::http::security::TokenParser).
///
/// The value is opaque to the gate: equality and hashing are by the
/// underlying string, which is what makes a token usable as a cache key.
/// Immutable once parsed; lives for one request unless a cache retains it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    value: String,
}

impl Token {
    pub fn new<V: Into<String>>(value: V) -> Self {
        Token { value: value.into() }
    }

    /// Returns the raw credential value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::new(value)
    }
}

// Credential material stays out of debug output.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({} chars)", self.value.len())
    }
}
