//! Role registry: the closed set of platform roles and their static definitions.
//!
//! The platform ships with three built-in roles:
//!
//! | Role       | Rank | Description                                              |
//! |------------|------|----------------------------------------------------------|
//! | Admin      | 3    | Full platform administration, user and role management   |
//! | Moderator  | 2    | Forum/news moderation and match/event/team management    |
//! | User       | 1    | Community member: browse, post, vote, report             |
//!
//! Permission lists are stored per role and are **not** cumulative: a role is
//! granted exactly the names listed in its own definition. Hierarchical
//! checks go through [`RoleId::rank`] instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::permissions as perm;
use crate::error::AccessError;

// ═══════════════════════════════════════════════════════════════════════════════
// Role identifier
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifier of a built-in role.
///
/// Variants are declared in ascending rank, so the derived `Ord` is the
/// authority ordering (`User < Moderator < Admin`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleId {
    #[default]
    User = 1,
    Moderator = 2,
    Admin = 3,
}

impl RoleId {
    /// Parse an exact, case-sensitive role identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "moderator" => Some(Self::Moderator),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Get the role identifier string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }

    /// Position in the authority hierarchy.
    pub const fn rank(&self) -> u8 {
        *self as u8
    }

    /// The static definition for this role.
    pub fn definition(&self) -> &'static RoleDefinition {
        match self {
            Self::User => &ROLE_DEFINITIONS[0],
            Self::Moderator => &ROLE_DEFINITIONS[1],
            Self::Admin => &ROLE_DEFINITIONS[2],
        }
    }

    /// All roles in ascending rank.
    pub const fn all() -> [RoleId; 3] {
        [Self::User, Self::Moderator, Self::Admin]
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleId {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AccessError::unknown_role(s))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Role definition
// ═══════════════════════════════════════════════════════════════════════════════

/// CSS class tokens used by themed widgets for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleTheme {
    /// Primary background (buttons, headers).
    pub primary: &'static str,
    /// Hover variant of `primary`.
    pub primary_hover: &'static str,
    /// Drop shadow tint.
    pub shadow: &'static str,
    /// Pill/badge classes, light and dark mode.
    pub badge: &'static str,
}

/// Static, process-wide definition of a role.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub id: RoleId,
    pub rank: u8,
    /// Human-readable name ("Administrator").
    pub display_name: &'static str,
    /// Short label shown on author badges ("Admin").
    pub badge_text: &'static str,
    pub icon: &'static str,
    pub theme: RoleTheme,
    /// Permissions granted to exactly this role.
    pub permissions: &'static [&'static str],
}

impl RoleDefinition {
    /// Check whether this definition lists `permission` explicitly.
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| *p == permission)
    }
}

const USER_PERMISSIONS: &[&str] = &[
    perm::VIEW_FORUMS,
    perm::VIEW_MATCHES,
    perm::VIEW_EVENTS,
    perm::VIEW_RANKINGS,
    perm::CREATE_THREADS,
    perm::POST_REPLIES,
    perm::VOTE,
    perm::EDIT_OWN_PROFILE,
    perm::REPORT_CONTENT,
];

// REPORT_CONTENT appears only in the user list.
const MODERATOR_PERMISSIONS: &[&str] = &[
    perm::VIEW_FORUMS,
    perm::VIEW_MATCHES,
    perm::VIEW_EVENTS,
    perm::VIEW_RANKINGS,
    perm::CREATE_THREADS,
    perm::POST_REPLIES,
    perm::VOTE,
    perm::EDIT_OWN_PROFILE,
    perm::MODERATION_PANEL,
    perm::MODERATE_FORUMS,
    perm::MODERATE_COMMENTS,
    perm::HANDLE_REPORTS,
    perm::MANAGE_NEWS,
    perm::MANAGE_MATCHES,
    perm::MANAGE_EVENTS,
    perm::MANAGE_TEAMS,
    perm::MANAGE_PLAYERS,
    perm::VIEW_MODERATION_LOGS,
];

const ADMIN_PERMISSIONS: &[&str] = &[
    perm::VIEW_FORUMS,
    perm::VIEW_MATCHES,
    perm::VIEW_EVENTS,
    perm::VIEW_RANKINGS,
    perm::CREATE_THREADS,
    perm::POST_REPLIES,
    perm::VOTE,
    perm::EDIT_OWN_PROFILE,
    perm::MODERATE_FORUMS,
    perm::MODERATE_COMMENTS,
    perm::HANDLE_REPORTS,
    perm::MANAGE_NEWS,
    perm::MANAGE_MATCHES,
    perm::MANAGE_EVENTS,
    perm::MANAGE_TEAMS,
    perm::MANAGE_PLAYERS,
    perm::VIEW_MODERATION_LOGS,
    perm::ADMIN_PANEL,
    perm::USER_MANAGEMENT,
    perm::ROLE_MANAGEMENT,
    perm::BULK_OPERATIONS,
    perm::VIEW_ANALYTICS,
    perm::SYSTEM_SETTINGS,
];

/// The registry, in ascending rank. Never mutated.
static ROLE_DEFINITIONS: [RoleDefinition; 3] = [
    RoleDefinition {
        id: RoleId::User,
        rank: 1,
        display_name: "User",
        badge_text: "User",
        icon: "👤",
        theme: RoleTheme {
            primary: "bg-green-600",
            primary_hover: "hover:bg-green-700",
            shadow: "shadow-green-500/30",
            badge: "bg-green-100 text-green-800 dark:bg-green-900/20 dark:text-green-400",
        },
        permissions: USER_PERMISSIONS,
    },
    RoleDefinition {
        id: RoleId::Moderator,
        rank: 2,
        display_name: "Moderator",
        badge_text: "Mod",
        icon: "🛡️",
        theme: RoleTheme {
            primary: "bg-yellow-600",
            primary_hover: "hover:bg-yellow-700",
            shadow: "shadow-yellow-500/30",
            badge: "bg-yellow-100 text-yellow-800 dark:bg-yellow-900/20 dark:text-yellow-400",
        },
        permissions: MODERATOR_PERMISSIONS,
    },
    RoleDefinition {
        id: RoleId::Admin,
        rank: 3,
        display_name: "Administrator",
        badge_text: "Admin",
        icon: "👑",
        theme: RoleTheme {
            primary: "bg-red-600",
            primary_hover: "hover:bg-red-700",
            shadow: "shadow-red-500/30",
            badge: "bg-red-100 text-red-800 dark:bg-red-900/20 dark:text-red-400",
        },
        permissions: ADMIN_PERMISSIONS,
    },
];

/// Look up a role definition by identifier string.
///
/// Unknown identifiers fall back to the `user` definition, so callers always
/// receive a usable, least-privileged answer.
pub fn get_role_definition(role_id: &str) -> &'static RoleDefinition {
    RoleId::parse(role_id).unwrap_or_default().definition()
}

/// Every role definition, in ascending rank.
pub fn role_definitions() -> &'static [RoleDefinition] {
    &ROLE_DEFINITIONS
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(RoleId::User.rank() < RoleId::Moderator.rank());
        assert!(RoleId::Moderator.rank() < RoleId::Admin.rank());
        assert!(RoleId::User < RoleId::Admin);
        assert_eq!(RoleId::User.rank(), 1);
        assert_eq!(RoleId::Admin.rank(), 3);
    }

    #[test]
    fn test_definition_rank_matches_id() {
        for role in RoleId::all() {
            let def = role.definition();
            assert_eq!(def.id, role);
            assert_eq!(def.rank, role.rank());
        }
    }

    #[test]
    fn test_role_ids() {
        assert_eq!(RoleId::Admin.as_str(), "admin");
        assert_eq!(RoleId::Moderator.as_str(), "moderator");
        assert_eq!(RoleId::User.as_str(), "user");
        assert_eq!(RoleId::parse("moderator"), Some(RoleId::Moderator));
        assert_eq!(RoleId::parse("Admin"), None);
        assert_eq!(RoleId::parse(""), None);
    }

    #[test]
    fn test_from_str_unknown_role() {
        assert_eq!("admin".parse::<RoleId>().unwrap(), RoleId::Admin);
        let err = "superuser".parse::<RoleId>().unwrap_err();
        assert!(err.user_message().contains("superuser"));
    }

    #[test]
    fn test_unknown_definition_falls_back_to_user() {
        assert_eq!(get_role_definition("bogus").id, RoleId::User);
        assert_eq!(get_role_definition("").id, RoleId::User);
        assert_eq!(get_role_definition("admin").id, RoleId::Admin);
    }

    #[test]
    fn test_permission_sets_not_cumulative() {
        let user = RoleId::User.definition();
        let moderator = RoleId::Moderator.definition();
        let admin = RoleId::Admin.definition();

        assert!(user.grants(perm::REPORT_CONTENT));
        assert!(!moderator.grants(perm::REPORT_CONTENT));
        assert!(!admin.grants(perm::REPORT_CONTENT));

        assert!(moderator.grants(perm::MODERATION_PANEL));
        assert!(!admin.grants(perm::MODERATION_PANEL));

        assert!(admin.grants(perm::USER_MANAGEMENT));
        assert!(!moderator.grants(perm::USER_MANAGEMENT));
    }

    #[test]
    fn test_role_definitions_in_rank_order() {
        let ranks: Vec<u8> = role_definitions().iter().map(|d| d.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_serialized_role_id() {
        assert_eq!(serde_json::to_string(&RoleId::Moderator).unwrap(), "\"moderator\"");
    }
}
