//! Extractors for accessing the resolved principal in handlers.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::token::Token;
use crate::http::security::user_details::UserDetails;

/// Extractor for the resolved principal.
///
/// # Usage
/// ```ignore
/// use restful_security_core::http::security::AuthenticatedUser;
///
/// async fn handler(user: AuthenticatedUser) -> impl Responder {
///     format!("Hello, {}!", user.id())
/// }
/// ```
///
/// # Errors
/// Returns `401 Unauthorized` when no principal was resolved for the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(UserDetails);

impl AuthenticatedUser {
    pub fn into_inner(self) -> UserDetails {
        self.0
    }
}

impl Deref for AuthenticatedUser {
    type Target = UserDetails;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<UserDetails>().cloned() {
            Some(user_details) => ready(Ok(AuthenticatedUser(user_details))),
            None => ready(Err(AuthError::Unauthorized)),
        }
    }
}

/// Optional extractor for the resolved principal.
///
/// Yields `None` instead of an error for anonymous requests.
#[derive(Debug, Clone)]
pub struct OptionalUser(Option<UserDetails>);

impl OptionalUser {
    pub fn into_inner(self) -> Option<UserDetails> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalUser {
    type Target = Option<UserDetails>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_details = req.extensions().get::<UserDetails>().cloned();
        ready(Ok(OptionalUser(user_details)))
    }
}

/// Extension trait for reading the authentication state off a request.
pub trait SecurityExt {
    /// The resolved principal, if any.
    fn user_details(&self) -> Option<UserDetails>;

    /// The raw token presented by the request, if any.
    fn token(&self) -> Option<Token>;

    fn is_authenticated(&self) -> bool;

    fn has_role(&self, role: &str) -> bool;

    fn has_any_role(&self, roles: &[&str]) -> bool;

    fn has_permission(&self, permission: &str) -> bool;

    fn has_any_permission(&self, permissions: &[&str]) -> bool;
}

impl SecurityExt for HttpRequest {
    fn user_details(&self) -> Option<UserDetails> {
        self.extensions().get::<UserDetails>().cloned()
    }

    fn token(&self) -> Option<Token> {
        self.extensions().get::<Token>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.extensions().get::<UserDetails>().is_some()
    }

    fn has_role(&self, role: &str) -> bool {
        self.extensions()
            .get::<UserDetails>()
            .is_some_and(|u| u.has_role(role))
    }

    fn has_any_role(&self, roles: &[&str]) -> bool {
        self.extensions()
            .get::<UserDetails>()
            .is_some_and(|u| u.has_any_role(roles))
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.extensions()
            .get::<UserDetails>()
            .is_some_and(|u| u.has_permission(permission))
    }

    fn has_any_permission(&self, permissions: &[&str]) -> bool {
        self.extensions()
            .get::<UserDetails>()
            .is_some_and(|u| u.has_any_permission(permissions))
    }
}
