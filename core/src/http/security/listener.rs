//! Post-resolution notification hook.

use actix_web::dev::ServiceRequest;

use crate::http::security::user_details::UserDetails;

/// Notified synchronously, exactly once per request, after a principal has
/// been resolved (from cache or realm) and published into the context.
///
/// Intended for side effects such as metrics or auditing. The gate does not
/// contain panics raised here; implementations must be robust.
pub trait AuthenticationListener: Send + Sync {
    /// `handler` identifies the dispatch target: the registered route pattern
    /// when one matched, otherwise the request path.
    fn on_authenticated(&self, req: &ServiceRequest, user_details: &UserDetails, handler: &str);
}

/// Does nothing; the default when no listener is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpAuthenticationListener;

impl AuthenticationListener for NoOpAuthenticationListener {
    fn on_authenticated(&self, _req: &ServiceRequest, _user_details: &UserDetails, _handler: &str) {
    }
}

/// Logs each successful resolution at `info`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingAuthenticationListener;

impl AuthenticationListener for LoggingAuthenticationListener {
    fn on_authenticated(&self, req: &ServiceRequest, user_details: &UserDetails, handler: &str) {
        log::info!(
            "authenticated {} for {} {} (handler {})",
            user_details.id(),
            req.method(),
            req.path(),
            handler
        );
    }
}
