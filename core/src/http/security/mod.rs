//! Token-based request security.
//!
//! # Module Structure
//!
//! - `token` - Opaque credential value extracted from a request
//! - `parser` - Token extraction strategies (header scheme, query, cookie)
//! - `locale` - Locale resolution handed to parsers
//! - `user_details` - Resolved principal model
//! - `realm` - Authoritative token-to-principal source (collaborator seam)
//! - `cache` - Token-to-principal cache in front of the realm
//! - `listener` - Post-resolution notification hook
//! - `context` - Request-scoped authentication context
//! - `requirements` - Declarative per-route access requirements
//! - `middleware` - The security gate (RestfulSecurity)
//! - `extractor` - Handler-side extractors (AuthenticatedUser, OptionalUser)

// Re-exports for convenience
pub use cache::{CacheManager, InMemoryCacheManager, NoOpCacheManager};
pub use context::AuthenticationContext;
pub use extractor::{AuthenticatedUser, OptionalUser, SecurityExt};
pub use listener::{
    AuthenticationListener, LoggingAuthenticationListener, NoOpAuthenticationListener,
};
pub use locale::{AcceptLanguageLocaleResolver, DefaultLocaleResolver, Locale, LocaleResolver};
pub use middleware::RestfulSecurity;
pub use parser::{
    CompositeTokenParser, CookieTokenParser, HttpHeaderTokenParser, QueryTokenParser, TokenParse,
    TokenParser,
};
pub use realm::{InMemoryRealm, RealmError, UserDetailsRealm};
pub use requirements::{
    AuthenticationStrategy, Logic, RequirementRegistry, RouteMatch, RoutePolicy,
    RouteRequirements,
};
pub use token::Token;
pub use user_details::UserDetails;

pub mod cache;
pub mod context;
pub mod extractor;
pub mod listener;
pub mod locale;
pub mod middleware;
pub mod parser;
pub mod realm;
pub mod requirements;
pub mod token;
pub mod user_details;
