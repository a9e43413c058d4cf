//! Token extraction strategies.
//!
//! A [`TokenParser`] pulls the presented credential out of one transport
//! location (a header with a scheme prefix, a query parameter, a cookie).
//! Absence of a credential is a normal outcome, never an error; a credential
//! that is present but does not match the expected shape is reported as
//! [`TokenParse::Malformed`] so the gate can log it, but the gate treats it
//! the same as absence.

use actix_web::dev::ServiceRequest;
use actix_web::http::header;

use crate::http::security::locale::Locale;
use crate::http::security::token::Token;

/// Result of one extraction attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenParse {
    /// No credential in the parser's transport location.
    Missing,
    /// Something was present but did not match the expected shape
    /// (wrong scheme prefix, undecodable bytes, empty value).
    Malformed,
    /// A credential was extracted.
    Token(Token),
}

impl TokenParse {
    pub fn token(self) -> Option<Token> {
        match self {
            TokenParse::Token(token) => Some(token),
            _ => None,
        }
    }
}

/// Strategy for extracting a [`Token`] from a request.
///
/// Implementations must not fail for well-formed credential-less requests.
pub trait TokenParser: Send + Sync {
    fn parse(&self, req: &ServiceRequest, locale: &Locale) -> TokenParse;
}

/// Extracts a token from a named header carrying a named scheme prefix,
/// e.g. `Authorization: Bearer <value>`.
#[derive(Clone, Debug)]
pub struct HttpHeaderTokenParser {
    header: String,
    prefix: String,
}

impl HttpHeaderTokenParser {
    pub fn new<H: Into<String>, P: Into<String>>(header: H, prefix: P) -> Self {
        HttpHeaderTokenParser {
            header: header.into(),
            prefix: prefix.into(),
        }
    }

    /// The conventional `Authorization: Bearer <value>` parser.
    pub fn bearer() -> Self {
        HttpHeaderTokenParser::new(header::AUTHORIZATION.as_str(), "Bearer ")
    }
}

impl TokenParser for HttpHeaderTokenParser {
    fn parse(&self, req: &ServiceRequest, _locale: &Locale) -> TokenParse {
        let value = match req.headers().get(self.header.as_str()) {
            Some(value) => value,
            None => return TokenParse::Missing,
        };

        let value = match value.to_str() {
            Ok(value) => value,
            Err(_) => return TokenParse::Malformed,
        };

        match value.strip_prefix(self.prefix.as_str()) {
            Some(rest) if !rest.trim().is_empty() => TokenParse::Token(Token::new(rest.trim())),
            _ => TokenParse::Malformed,
        }
    }
}

/// Extracts a token from a query-string parameter, e.g. `?access_token=...`.
///
/// The raw parameter value is used as-is; percent-decoding is left to the
/// client convention that put it there.
#[derive(Clone, Debug)]
pub struct QueryTokenParser {
    param: String,
}

impl QueryTokenParser {
    pub fn new<P: Into<String>>(param: P) -> Self {
        QueryTokenParser { param: param.into() }
    }
}

impl TokenParser for QueryTokenParser {
    fn parse(&self, req: &ServiceRequest, _locale: &Locale) -> TokenParse {
        for pair in req.query_string().split('&') {
            let mut parts = pair.splitn(2, '=');
            if parts.next() != Some(self.param.as_str()) {
                continue;
            }
            return match parts.next() {
                Some(value) if !value.is_empty() => TokenParse::Token(Token::new(value)),
                _ => TokenParse::Malformed,
            };
        }
        TokenParse::Missing
    }
}

/// Extracts a token from a cookie.
#[derive(Clone, Debug)]
pub struct CookieTokenParser {
    name: String,
}

impl CookieTokenParser {
    pub fn new<N: Into<String>>(name: N) -> Self {
        CookieTokenParser { name: name.into() }
    }
}

impl TokenParser for CookieTokenParser {
    fn parse(&self, req: &ServiceRequest, _locale: &Locale) -> TokenParse {
        match req.request().cookie(&self.name) {
            Some(cookie) if !cookie.value().is_empty() => {
                TokenParse::Token(Token::new(cookie.value()))
            }
            Some(_) => TokenParse::Malformed,
            None => TokenParse::Missing,
        }
    }
}

/// Tries a sequence of parsers in order; the first extracted token wins.
///
/// When nothing parses, a `Malformed` seen anywhere in the chain outranks
/// `Missing`, so the gate can still log that a credential was attempted.
#[derive(Default)]
pub struct CompositeTokenParser {
    parsers: Vec<Box<dyn TokenParser>>,
}

impl CompositeTokenParser {
    pub fn new() -> Self {
        CompositeTokenParser { parsers: Vec::new() }
    }

    pub fn with<P: TokenParser + 'static>(mut self, parser: P) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }
}

impl TokenParser for CompositeTokenParser {
    fn parse(&self, req: &ServiceRequest, locale: &Locale) -> TokenParse {
        let mut saw_malformed = false;
        for parser in &self.parsers {
            match parser.parse(req, locale) {
                TokenParse::Token(token) => return TokenParse::Token(token),
                TokenParse::Malformed => saw_malformed = true,
                TokenParse::Missing => {}
            }
        }
        if saw_malformed {
            TokenParse::Malformed
        } else {
            TokenParse::Missing
        }
    }
}
