//! Locale resolution for token parsing.
//!
//! The gate resolves a locale once per request and hands it to the token
//! parser, so parsers producing locale-sensitive diagnostics elsewhere have
//! it available. The gate itself never inspects the locale.

use actix_web::dev::ServiceRequest;
use actix_web::http::header;
use std::fmt;

/// A language tag such as `en` or `zh-CN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    tag: String,
}

impl Locale {
    pub fn new<T: Into<String>>(tag: T) -> Self {
        Locale { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Strategy for deriving the request locale.
pub trait LocaleResolver: Send + Sync {
    fn resolve_locale(&self, req: &ServiceRequest) -> Locale;
}

/// Ignores the request and always yields [`Locale::default`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLocaleResolver;

impl LocaleResolver for DefaultLocaleResolver {
    fn resolve_locale(&self, _req: &ServiceRequest) -> Locale {
        Locale::default()
    }
}

/// Takes the first tag of the `Accept-Language` header, falling back to
/// [`Locale::default`] when the header is missing or unreadable.
///
/// Quality weights are not honored; the client's first preference wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptLanguageLocaleResolver;

impl LocaleResolver for AcceptLanguageLocaleResolver {
    fn resolve_locale(&self, req: &ServiceRequest) -> Locale {
        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|tag| tag.split(';').next().unwrap_or(tag).trim())
            .filter(|tag| !tag.is_empty() && *tag != "*")
            .map(Locale::new)
            .unwrap_or_default()
    }
}
