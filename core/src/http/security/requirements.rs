//! Declarative per-route access requirements.
//!
//! Requirements are plain data attached to route patterns at registration
//! time and injected into the gate; no runtime reflection or discovery is
//! involved. Four requirement kinds exist: authenticated, guest, roles, and
//! permissions. Role and permission requirements carry their own
//! satisfaction semantics ([`Logic::All`] or [`Logic::Any`]).

use actix_web::http::Method;
use regex::Regex;

use crate::http::error::AuthError;
use crate::http::security::user_details::UserDetails;

/// Whether every endpoint undergoes token resolution, or only endpoints with
/// registered requirements.
///
/// Fixed at gate construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthenticationStrategy {
    /// Resolve tokens for every request, requirements or not.
    All,
    /// Skip all authentication work for routes without requirements.
    OnlyAnnotated,
}

impl Default for AuthenticationStrategy {
    fn default() -> Self {
        AuthenticationStrategy::All
    }
}

/// Satisfaction semantics for a role or permission requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Logic {
    /// Every listed value must be held.
    All,
    /// At least one listed value must be held.
    Any,
}

#[derive(Clone, Debug)]
struct RequiredSet {
    logic: Logic,
    values: Vec<String>,
}

impl RequiredSet {
    fn satisfied_by(&self, held: &[String]) -> bool {
        let holds = |v: &String| held.iter().any(|h| h == v);
        match self.logic {
            Logic::All => self.values.iter().all(holds),
            Logic::Any => self.values.iter().any(holds),
        }
    }
}

/// The requirements declared for one route.
///
/// Evaluation order is fixed: authenticated, then guest, then roles, then
/// permissions; the first unmet requirement denies the request.
///
/// # Example
/// ```
/// use restful_security_core::http::security::{Logic, RouteRequirements, UserDetails};
///
/// let reqs = RouteRequirements::new().roles(Logic::All, &["ADMIN"]);
/// let admin = UserDetails::new("alice").roles(&["ADMIN"]);
///
/// assert!(reqs.check(Some(&admin)).is_ok());
/// assert!(reqs.check(None).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RouteRequirements {
    authenticated: bool,
    guest: bool,
    roles: Option<RequiredSet>,
    permissions: Option<RequiredSet>,
}

impl RouteRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a resolved principal.
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    /// Requires that no principal is resolved (login/registration style
    /// endpoints).
    pub fn guest(mut self) -> Self {
        self.guest = true;
        self
    }

    /// Requires role membership under the given logic.
    pub fn roles(mut self, logic: Logic, roles: &[&str]) -> Self {
        self.roles = Some(RequiredSet {
            logic,
            values: roles.iter().map(|r| (*r).to_string()).collect(),
        });
        self
    }

    /// Requires permissions under the given logic.
    pub fn permissions(mut self, logic: Logic, permissions: &[&str]) -> Self {
        self.permissions = Some(RequiredSet {
            logic,
            values: permissions.iter().map(|p| (*p).to_string()).collect(),
        });
        self
    }

    /// True when no requirement kind is declared.
    pub fn is_empty(&self) -> bool {
        !self.authenticated && !self.guest && self.roles.is_none() && self.permissions.is_none()
    }

    /// Evaluates the declared requirements against the resolved principal.
    ///
    /// Anonymous requests denied by a role/permission requirement get
    /// `Unauthorized`; authenticated ones lacking membership get `Forbidden`.
    pub fn check(&self, user_details: Option<&UserDetails>) -> Result<(), AuthError> {
        if self.authenticated && user_details.is_none() {
            return Err(AuthError::Unauthorized);
        }

        if self.guest && user_details.is_some() {
            return Err(AuthError::Forbidden);
        }

        if let Some(required) = &self.roles {
            match user_details {
                None => return Err(AuthError::Unauthorized),
                Some(u) if !required.satisfied_by(u.get_roles()) => {
                    return Err(AuthError::Forbidden);
                }
                Some(_) => {}
            }
        }

        if let Some(required) = &self.permissions {
            match user_details {
                None => return Err(AuthError::Unauthorized),
                Some(u) if !required.satisfied_by(u.get_permissions()) => {
                    return Err(AuthError::Forbidden);
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// What the registry prescribes for a matched route.
#[derive(Clone, Debug)]
pub enum RoutePolicy {
    /// Unconditional pass-through, bypassing all authentication work;
    /// for untyped endpoints such as static resources.
    Permit,
    /// Enforce the given requirements.
    Require(RouteRequirements),
}

struct RegisteredRoute {
    method: Option<Method>,
    raw: String,
    pattern: Regex,
    policy: RoutePolicy,
}

/// A successful registry lookup.
pub struct RouteMatch<'a> {
    /// The pattern as registered; doubles as the handler identity reported
    /// to listeners.
    pub pattern: &'a str,
    pub policy: &'a RoutePolicy,
}

/// Ordered mapping from route patterns to access requirements.
///
/// Patterns are anchored regular expressions matched against the request
/// path, compiled once at registration; entries may be restricted to a
/// method. The first matching entry wins, so register specific patterns
/// before broad ones.
///
/// # Example
/// ```
/// use restful_security_core::http::security::{Logic, RequirementRegistry, RouteRequirements};
///
/// let registry = RequirementRegistry::new()
///     .permit("/static/.*")
///     .route("/admin/.*", RouteRequirements::new().roles(Logic::All, &["ADMIN"]))
///     .route("/profile", RouteRequirements::new().authenticated());
/// ```
#[derive(Default)]
pub struct RequirementRegistry {
    routes: Vec<RegisteredRoute>,
}

impl RequirementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers requirements for every method on a pattern.
    ///
    /// # Panics
    /// Panics on an invalid pattern; route registration happens at startup
    /// and a bad pattern is a programming error.
    pub fn route(self, pattern: &str, requirements: RouteRequirements) -> Self {
        self.add(None, pattern, RoutePolicy::Require(requirements))
    }

    /// Registers requirements for a single method on a pattern.
    pub fn method_route(
        self,
        method: Method,
        pattern: &str,
        requirements: RouteRequirements,
    ) -> Self {
        self.add(Some(method), pattern, RoutePolicy::Require(requirements))
    }

    /// Marks a pattern as unconditional pass-through.
    pub fn permit(self, pattern: &str) -> Self {
        self.add(None, pattern, RoutePolicy::Permit)
    }

    fn add(mut self, method: Option<Method>, pattern: &str, policy: RoutePolicy) -> Self {
        let compiled = match Regex::new(&format!("^(?:{})$", pattern)) {
            Ok(compiled) => compiled,
            Err(e) => panic!("invalid route pattern {:?}: {}", pattern, e),
        };
        self.routes.push(RegisteredRoute {
            method,
            raw: pattern.to_string(),
            pattern: compiled,
            policy,
        });
        self
    }

    /// Finds the first entry matching the request; `None` means the route is
    /// unregistered.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes
            .iter()
            .find(|route| {
                route.method.as_ref().map(|m| m == method).unwrap_or(true)
                    && route.pattern.is_match(path)
            })
            .map(|route| RouteMatch {
                pattern: &route.raw,
                policy: &route.policy,
            })
    }
}
