//! RBAC data models: the user record, its normalized role claims, and the
//! derived navigation/presentation values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use super::roles::RoleId;
use crate::error::{AccessError, ErrorCode, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// Identifiers
// ═══════════════════════════════════════════════════════════════════════════════

/// Opaque user identifier.
///
/// Session payloads carry ids as either strings or numbers; both normalize
/// to the string form so `"42"` and `42` identify the same user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// User
// ═══════════════════════════════════════════════════════════════════════════════

/// A user record as supplied by the authentication/session layer.
///
/// Every field is optional and deserialization is lenient: values of the
/// wrong shape are dropped instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Legacy single-role shape.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Multi-role shape. Takes precedence over `role` whenever present.
    #[serde(default, deserialize_with = "lenient_roles", skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl User {
    /// Create a user with only an id.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the legacy single `role` field.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the `roles` collection.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// The role claims carried by this record.
    pub fn claims(&self) -> RoleClaims<'_> {
        RoleClaims::of(Some(self))
    }

    /// Whether both records carry an id and the ids are equal.
    pub fn is_same_user(&self, other: &User) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }

    /// Parse a user record from JSON.
    ///
    /// `null` yields `Ok(None)` (an anonymous visitor). Anything other than
    /// an object or `null` is rejected.
    pub fn from_json(input: &str) -> Result<Option<User>> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parse a user record from YAML, with the same rules as [`User::from_json`].
    pub fn from_yaml(input: &str) -> Result<Option<User>> {
        let value: Value = serde_yaml::from_str(input)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Option<User>> {
        match value {
            Value::Null => Ok(None),
            Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
            other => Err(AccessError::new(
                ErrorCode::InvalidUserRecord,
                "User record must be an object or null",
            )
            .with_context("found", json_kind(&other))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(UserId(s)),
        Some(Value::Number(n)) => Some(UserId(n.to_string())),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_roles<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Role claims
// ═══════════════════════════════════════════════════════════════════════════════

/// The raw role strings a (possibly absent) user carries, normalized from the
/// two record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleClaims<'a> {
    /// `roles` is present (possibly empty); `role` is ignored.
    Many(&'a [String]),
    /// Only the legacy `role` field is present.
    Single(&'a str),
    /// No user, or a user without any role field.
    Absent,
}

impl<'a> RoleClaims<'a> {
    pub fn of(user: Option<&'a User>) -> Self {
        match user {
            Some(User { roles: Some(roles), .. }) => Self::Many(roles),
            Some(User { role: Some(role), .. }) => Self::Single(role),
            _ => Self::Absent,
        }
    }

    /// Literal membership: no hierarchy, no parsing.
    pub fn contains(&self, role: &str) -> bool {
        self.iter().any(|claimed| claimed == role)
    }

    /// Iterate the claimed strings in record order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let (many, single): (&'a [String], Option<&'a str>) = match *self {
            Self::Many(list) => (list, None),
            Self::Single(role) => (Default::default(), Some(role)),
            Self::Absent => (Default::default(), None),
        };
        many.iter().map(String::as_str).chain(single)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Derived values
// ═══════════════════════════════════════════════════════════════════════════════

/// A navigation menu entry, gated by a single permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub required_permission: &'static str,
}

/// The landing page a user is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardRoute {
    AdminDashboard,
    ModeratorDashboard,
    UserDashboard,
}

impl DashboardRoute {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AdminDashboard => "admin-dashboard",
            Self::ModeratorDashboard => "moderator-dashboard",
            Self::UserDashboard => "user-dashboard",
        }
    }
}

impl fmt::Display for DashboardRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge shown next to a user's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleBadge {
    pub role: RoleId,
    pub text: &'static str,
    pub icon: &'static str,
    pub theme_class_names: &'static str,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
