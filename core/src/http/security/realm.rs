//! The authoritative token-to-principal source.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{error, HttpResponse, HttpResponseBuilder};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::http::security::token::Token;
use crate::http::security::user_details::UserDetails;

/// Errors a realm may raise while consulting its backing store.
///
/// A realm failure is not an authorization decision: the gate propagates it
/// unchanged and the request fails closed with a server error.
#[derive(Debug)]
pub enum RealmError {
    /// The backing store (database, remote service) failed.
    Storage(String),
    /// Any other realm-specific failure.
    Other(String),
}

impl fmt::Display for RealmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealmError::Storage(e) => write!(f, "realm storage error: {}", e),
            RealmError::Other(e) => write!(f, "realm error: {}", e),
        }
    }
}

impl std::error::Error for RealmError {}

impl error::ResponseError for RealmError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        // The cause stays in the log, not on the wire.
        HttpResponseBuilder::new(self.status_code()).body("internal error")
    }
}

/// Loads the principal a token stands for.
///
/// `Ok(None)` means "no principal for this token" and is handled exactly like
/// an absent credential: the request proceeds unauthenticated and requirement
/// checks decide whether that is acceptable.
///
/// # Example
/// ```rust,ignore
/// struct DatabaseRealm { pool: PgPool }
///
/// #[async_trait]
/// impl UserDetailsRealm for DatabaseRealm {
///     async fn load_user_details(&self, token: &Token)
///         -> Result<Option<UserDetails>, RealmError>
///     {
///         let row = sqlx::query!("SELECT ... WHERE token = $1", token.value())
///             .fetch_optional(&self.pool)
///             .await
///             .map_err(|e| RealmError::Storage(e.to_string()))?;
///         Ok(row.map(|r| UserDetails::new(r.id).roles(...)))
///     }
/// }
/// ```
#[async_trait]
pub trait UserDetailsRealm: Send + Sync {
    async fn load_user_details(&self, token: &Token) -> Result<Option<UserDetails>, RealmError>;
}

/// In-memory realm keyed by raw token value.
///
/// Useful for demos and tests.
#[derive(Clone, Default)]
pub struct InMemoryRealm {
    users: Arc<RwLock<HashMap<String, UserDetails>>>,
    seed: HashMap<String, UserDetails>,
}

impl InMemoryRealm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a principal for a token value (builder pattern).
    pub fn with_user<T: Into<String>>(mut self, token_value: T, user_details: UserDetails) -> Self {
        self.seed.insert(token_value.into(), user_details);
        // Rebuild the shared map so clones made before and after see the
        // same seeded set once the realm is in use.
        self.users = Arc::new(RwLock::new(self.seed.clone()));
        self
    }

    /// Registers a principal on a realm already in use.
    pub async fn add_user<T: Into<String>>(&self, token_value: T, user_details: UserDetails) {
        let mut users = self.users.write().await;
        users.insert(token_value.into(), user_details);
    }

    /// Removes a principal; subsequent loads for its token yield `Ok(None)`.
    pub async fn remove_user(&self, token_value: &str) {
        let mut users = self.users.write().await;
        users.remove(token_value);
    }
}

#[async_trait]
impl UserDetailsRealm for InMemoryRealm {
    async fn load_user_details(&self, token: &Token) -> Result<Option<UserDetails>, RealmError> {
        let users = self.users.read().await;
        Ok(users.get(token.value()).cloned())
    }
}
