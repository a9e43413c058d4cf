//! Resolved principal model.

use std::collections::HashMap;
use std::fmt;

/// The principal a token resolves to: an identity plus role and permission
/// sets, with room for realm-specific string attributes.
///
/// Immutable snapshot semantics: the gate, cache, and context each hold their
/// own clone; nothing mutates a `UserDetails` after construction.
///
/// # Example
/// ```
/// use restful_security_core::http::security::UserDetails;
///
/// let user = UserDetails::new("alice")
///     .roles(&["ADMIN", "USER"])
///     .permissions(&["users:read", "users:write"])
///     .attribute("tenant", "acme");
///
/// assert!(user.has_role("ADMIN"));
/// assert!(user.has_permission("users:read"));
/// assert_eq!(user.get_attribute("tenant"), Some("acme"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDetails {
    id: String,
    roles: Vec<String>,
    permissions: Vec<String>,
    attributes: HashMap<String, String>,
}

impl UserDetails {
    pub fn new<I: Into<String>>(id: I) -> Self {
        UserDetails {
            id: id.into(),
            roles: Vec::new(),
            permissions: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Returns the principal identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    pub fn get_permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Adds roles (builder pattern); duplicates are ignored.
    pub fn roles(mut self, roles: &[&str]) -> Self {
        for role in roles {
            if !self.roles.iter().any(|r| r == role) {
                self.roles.push((*role).to_string());
            }
        }
        self
    }

    /// Adds permissions (builder pattern); duplicates are ignored.
    pub fn permissions(mut self, permissions: &[&str]) -> Self {
        for permission in permissions {
            if !self.permissions.iter().any(|p| p == permission) {
                self.permissions.push((*permission).to_string());
            }
        }
        self
    }

    /// Adds a realm-specific attribute (builder pattern).
    pub fn attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// OR logic over the given roles.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// AND logic over the given roles.
    pub fn has_all_roles(&self, roles: &[&str]) -> bool {
        roles.iter().all(|role| self.has_role(role))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// OR logic over the given permissions.
    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    /// AND logic over the given permissions.
    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }
}

impl fmt::Display for UserDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserDetails {{ id: {}, roles: {:?}, permissions: {:?} }}",
            self.id, self.roles, self.permissions
        )
    }
}
