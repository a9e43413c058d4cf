//! # Restful Security Core
//!
//! Token-based request authentication and declarative authorization for
//! Actix Web.
//!
//! The crate provides a single pre-request gate ([`RestfulSecurity`]) that
//! extracts an opaque credential token from the incoming request, resolves it
//! to a principal through a pluggable realm (with an optional cache in
//! front), publishes both into a request-scoped authentication context, and
//! enforces per-route requirements (authenticated / guest / roles /
//! permissions) before the handler runs.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use actix_web::{App, HttpServer};
//! use restful_security_core::http::security::{
//!     AuthenticationStrategy, InMemoryCacheManager, InMemoryRealm, Logic,
//!     RequirementRegistry, RestfulSecurity, RouteRequirements, UserDetails,
//! };
//!
//! let realm = InMemoryRealm::new()
//!     .with_user("token-1", UserDetails::new("alice").roles(&["ADMIN"]));
//!
//! let security = RestfulSecurity::new(Arc::new(realm))
//!     .cache_manager(Arc::new(InMemoryCacheManager::new()))
//!     .strategy(AuthenticationStrategy::OnlyAnnotated)
//!     .requirements(
//!         RequirementRegistry::new()
//!             .route("/admin/.*", RouteRequirements::new().roles(Logic::All, &["ADMIN"]))
//!             .route("/profile", RouteRequirements::new().authenticated()),
//!     );
//!
//! App::new().wrap(security);
//! ```
//!
//! ## Modules
//!
//! - [`http::security`] - Token parsing, realm/cache seams, the gate
//! - [`http::error`] - Authorization error type
//!
//! [`RestfulSecurity`]: http::security::RestfulSecurity

pub mod http;
