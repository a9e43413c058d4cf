//! Token-to-principal cache in front of the realm.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::http::security::token::Token;
use crate::http::security::user_details::UserDetails;

/// Spares the realm a lookup for tokens it has already resolved.
///
/// The gate writes through only after a successful realm load; a failed or
/// empty load never creates an entry. There is no single-flight dedup:
/// concurrent requests carrying the same unseen token may each hit the realm
/// and the last writer wins, which is harmless because a valid token maps to
/// the same principal throughout its validity window. `get` and `save` are
/// individually atomic; get-then-save is not a transaction.
#[async_trait]
pub trait CacheManager: Send + Sync {
    /// Returns the principal previously associated with an equal token, if
    /// the entry is still within its retention window.
    async fn get_user_details(&self, token: &Token) -> Option<UserDetails>;

    /// Associates a principal with a token.
    async fn save_user_details(&self, token: &Token, user_details: UserDetails);
}

/// A cache that never holds anything; every lookup goes to the realm.
///
/// The default when no cache is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpCacheManager;

#[async_trait]
impl CacheManager for NoOpCacheManager {
    async fn get_user_details(&self, _token: &Token) -> Option<UserDetails> {
        None
    }

    async fn save_user_details(&self, _token: &Token, _user_details: UserDetails) {}
}

struct CachedEntry {
    user_details: UserDetails,
    cached_at: Instant,
}

/// TTL-bounded in-process cache.
///
/// Entries past their time-to-live are never returned and are dropped when
/// observed. Safe for concurrent use from all request-handling tasks.
///
/// # Example
/// ```rust,ignore
/// let cache = InMemoryCacheManager::new().ttl(Duration::from_secs(60));
/// ```
pub struct InMemoryCacheManager {
    entries: Arc<RwLock<HashMap<Token, CachedEntry>>>,
    ttl: Duration,
}

impl InMemoryCacheManager {
    /// Creates a cache with the default retention of 5 minutes.
    pub fn new() -> Self {
        InMemoryCacheManager {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(300),
        }
    }

    /// Sets the retention window.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Drops a single entry.
    pub async fn invalidate(&self, token: &Token) {
        let mut entries = self.entries.write().await;
        entries.remove(token);
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    fn is_valid(&self, entry: &CachedEntry) -> bool {
        entry.cached_at.elapsed() < self.ttl
    }
}

impl Default for InMemoryCacheManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheManager for InMemoryCacheManager {
    async fn get_user_details(&self, token: &Token) -> Option<UserDetails> {
        {
            let entries = self.entries.read().await;
            match entries.get(token) {
                Some(entry) if self.is_valid(entry) => {
                    return Some(entry.user_details.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired entry observed: drop it so it cannot outlive its window.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(token) {
            if !self.is_valid(entry) {
                entries.remove(token);
            }
        }
        None
    }

    async fn save_user_details(&self, token: &Token, user_details: UserDetails) {
        let mut entries = self.entries.write().await;
        entries.insert(
            token.clone(),
            CachedEntry {
                user_details,
                cached_at: Instant::now(),
            },
        );
    }
}
