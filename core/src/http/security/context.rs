//! Request-scoped authentication context.
//!
//! # Overview
//! While the gate handles a request it publishes the parsed [`Token`] and the
//! resolved [`UserDetails`] into a task-local slot, so service-layer code can
//! see the current principal without threading it through every call.
//!
//! # Isolation
//! The slot lives in task-local storage: each request's handling task has its
//! own, and the slot is dropped when the scope future completes on any path
//! (success, denial, or unwind). Reads outside a scope return `None` - never
//! another request's data.

use std::cell::RefCell;
use std::future::Future;

use crate::http::security::token::Token;
use crate::http::security::user_details::UserDetails;

#[derive(Default)]
struct ContextSlot {
    token: Option<Token>,
    user_details: Option<UserDetails>,
}

tokio::task_local! {
    static AUTH_CONTEXT: RefCell<ContextSlot>;
}

/// Accessors for the per-request authentication slot.
///
/// # Example
/// ```ignore
/// use restful_security_core::http::security::AuthenticationContext;
///
/// fn audit_actor() -> String {
///     AuthenticationContext::current_user_details()
///         .map(|u| u.id().to_string())
///         .unwrap_or_else(|| "anonymous".to_string())
/// }
/// ```
pub struct AuthenticationContext;

impl AuthenticationContext {
    /// Runs `f` with a fresh, empty context slot.
    ///
    /// Used by the security middleware to bound the slot to exactly one
    /// request's handling; tests use it the same way.
    pub async fn scope<F, R>(f: F) -> R
    where
        F: Future<Output = R>,
    {
        AUTH_CONTEXT.scope(RefCell::new(ContextSlot::default()), f).await
    }

    /// Publishes the parsed token. No effect outside a scope.
    pub fn set_token(token: Token) {
        let _ = AUTH_CONTEXT.try_with(|ctx| {
            ctx.borrow_mut().token = Some(token);
        });
    }

    /// Publishes the resolved principal (or its explicit absence).
    pub fn set_user_details(user_details: Option<UserDetails>) {
        let _ = AUTH_CONTEXT.try_with(|ctx| {
            ctx.borrow_mut().user_details = user_details;
        });
    }

    /// The raw token presented by the current request, if any.
    pub fn current_token() -> Option<Token> {
        AUTH_CONTEXT
            .try_with(|ctx| ctx.borrow().token.clone())
            .ok()
            .flatten()
    }

    /// The principal resolved for the current request, if any.
    pub fn current_user_details() -> Option<UserDetails> {
        AUTH_CONTEXT
            .try_with(|ctx| ctx.borrow().user_details.clone())
            .ok()
            .flatten()
    }

    pub fn is_authenticated() -> bool {
        Self::current_user_details().is_some()
    }

    pub fn has_role(role: &str) -> bool {
        Self::current_user_details()
            .map(|u| u.has_role(role))
            .unwrap_or(false)
    }

    pub fn has_permission(permission: &str) -> bool {
        Self::current_user_details()
            .map(|u| u.has_permission(permission))
            .unwrap_or(false)
    }

    /// Empties the slot without leaving the scope.
    pub fn clear() {
        let _ = AUTH_CONTEXT.try_with(|ctx| {
            *ctx.borrow_mut() = ContextSlot::default();
        });
    }
}
