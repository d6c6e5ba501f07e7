//! Permission evaluation and management-authority checks.
//!
//! The evaluator answers the question:
//! "Can this (possibly anonymous) user see or do X?"
//!
//! Two families of checks are deliberately kept apart:
//! - [`has_role`] is a literal membership test on the claimed role strings.
//! - [`has_minimum_role`] compares the primary role's rank.
//!
//! Permission checks consult only the primary role's own permission list.

use serde::Serialize;
use tracing::debug;

use super::models::{RoleClaims, User};
use super::resolver::resolve_primary_role;
use super::roles::{RoleDefinition, RoleId};
use crate::error::{AccessError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// Decision
// ═══════════════════════════════════════════════════════════════════════════════

/// Why a permission check was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Denial {
    /// No user record: the caller should prompt for login.
    Unauthenticated,
    /// The user's primary role does not list the permission.
    InsufficientRole { role: RoleId, permission: String },
}

/// Result of a policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PolicyDecision {
    /// The action is allowed.
    Allow,
    /// The action is denied, with a reason.
    Deny(Denial),
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }

    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Allow => None,
            Self::Deny(denial) => Some(denial),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Checks
// ═══════════════════════════════════════════════════════════════════════════════

/// Literal role membership.
///
/// True iff `role` appears in `roles` (when present), otherwise iff it equals
/// `role`. A moderator does not `has_role(User)`.
pub fn has_role(user: Option<&User>, role: RoleId) -> bool {
    RoleClaims::of(user).contains(role.as_str())
}

/// Hierarchical check: the primary role ranks at least as high as `role`.
pub fn has_minimum_role(user: Option<&User>, role: RoleId) -> bool {
    resolve_primary_role(user) >= role
}

/// Whether the primary role's own permission list contains `permission`.
pub fn has_permission(user: Option<&User>, permission: &str) -> bool {
    resolve_primary_role(user).definition().grants(permission)
}

/// True if any of `permissions` is granted. An empty list grants nothing.
pub fn has_any_permission(user: Option<&User>, permissions: &[&str]) -> bool {
    let definition = resolve_primary_role(user).definition();
    permissions.iter().any(|p| definition.grants(p))
}

/// True if every one of `permissions` is granted. An empty list is vacuously granted.
pub fn has_all_permissions(user: Option<&User>, permissions: &[&str]) -> bool {
    let definition = resolve_primary_role(user).definition();
    permissions.iter().all(|p| definition.grants(p))
}

/// Decide whether `actor` may administratively act on `target`.
///
/// - admins may act on themselves and on anyone who is not another admin;
/// - moderators may act only on plain users;
/// - everyone else may act only on themselves.
///
/// Either party missing denies.
pub fn can_manage_user(actor: Option<&User>, target: Option<&User>) -> bool {
    let (Some(actor), Some(target)) = (actor, target) else {
        return false;
    };

    match resolve_primary_role(Some(actor)) {
        RoleId::Admin => {
            resolve_primary_role(Some(target)) != RoleId::Admin || actor.is_same_user(target)
        }
        RoleId::Moderator => resolve_primary_role(Some(target)) == RoleId::User,
        RoleId::User => actor.is_same_user(target),
    }
}

/// Evaluate a permission and explain a denial.
///
/// An anonymous visitor still receives the default role's permissions; only
/// when those fall short is the denial reported as [`Denial::Unauthenticated`].
pub fn authorize(user: Option<&User>, permission: &str) -> PolicyDecision {
    let role = resolve_primary_role(user);
    if role.definition().grants(permission) {
        return PolicyDecision::Allow;
    }

    let denial = match user {
        None => Denial::Unauthenticated,
        Some(_) => Denial::InsufficientRole {
            role,
            permission: permission.to_string(),
        },
    };
    debug!(role = %role, permission = permission, denial = ?denial, "Permission denied");
    PolicyDecision::Deny(denial)
}

/// Convenience: returns `Ok(())` if allowed, an error otherwise.
pub fn enforce(user: Option<&User>, permission: &str) -> Result<()> {
    match authorize(user, permission) {
        PolicyDecision::Allow => Ok(()),
        PolicyDecision::Deny(Denial::Unauthenticated) => Err(AccessError::unauthenticated(permission)),
        PolicyDecision::Deny(Denial::InsufficientRole { role, permission }) => {
            Err(AccessError::forbidden(role, &permission))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Access context
// ═══════════════════════════════════════════════════════════════════════════════

/// A user bound to its resolved primary role, for call sites that run many
/// checks against the same record (a render pass, a CLI command).
#[derive(Debug, Clone, Copy)]
pub struct AccessContext<'a> {
    user: Option<&'a User>,
    primary: RoleId,
}

impl<'a> AccessContext<'a> {
    pub fn new(user: Option<&'a User>) -> Self {
        Self {
            user,
            primary: resolve_primary_role(user),
        }
    }

    pub fn user(&self) -> Option<&'a User> {
        self.user
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn primary_role(&self) -> RoleId {
        self.primary
    }

    pub fn definition(&self) -> &'static RoleDefinition {
        self.primary.definition()
    }

    pub fn has_role(&self, role: RoleId) -> bool {
        has_role(self.user, role)
    }

    pub fn has_minimum_role(&self, role: RoleId) -> bool {
        self.primary >= role
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.definition().grants(permission)
    }

    pub fn authorize(&self, permission: &str) -> PolicyDecision {
        authorize(self.user, permission)
    }

    pub fn can_manage(&self, target: Option<&User>) -> bool {
        can_manage_user(self.user, target)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::rbac::permissions as perm;

    fn user(id: &str, role: &str) -> User {
        User::new(id).with_role(role)
    }

    #[test]
    fn test_has_role_is_literal() {
        let moderator = user("m", "moderator");
        assert!(has_role(Some(&moderator), RoleId::Moderator));
        assert!(!has_role(Some(&moderator), RoleId::User));
        assert!(!has_role(None, RoleId::User));
    }

    #[test]
    fn test_has_role_checks_roles_collection() {
        let multi = User::new("x").with_role("admin").with_roles(["moderator"]);
        assert!(has_role(Some(&multi), RoleId::Moderator));
        assert!(!has_role(Some(&multi), RoleId::Admin));
    }

    #[test]
    fn test_has_minimum_role_is_hierarchical() {
        let moderator = user("m", "moderator");
        assert!(has_minimum_role(Some(&moderator), RoleId::User));
        assert!(has_minimum_role(Some(&moderator), RoleId::Moderator));
        assert!(!has_minimum_role(Some(&moderator), RoleId::Admin));

        let plain = user("u", "user");
        assert!(!has_minimum_role(Some(&plain), RoleId::Moderator));
        assert!(has_minimum_role(None, RoleId::User));
    }

    #[test]
    fn test_has_permission_per_role() {
        let admin = user("a", "admin");
        let moderator = user("m", "moderator");
        assert!(has_permission(Some(&admin), perm::USER_MANAGEMENT));
        assert!(!has_permission(Some(&moderator), perm::USER_MANAGEMENT));
        assert!(!has_permission(Some(&moderator), perm::REPORT_CONTENT));
        assert!(has_permission(None, perm::VIEW_FORUMS));
        assert!(!has_permission(None, "unknown_permission"));
    }

    #[test]
    fn test_any_and_all_permissions() {
        let moderator = user("m", "moderator");
        assert!(has_any_permission(Some(&moderator), &[perm::USER_MANAGEMENT, perm::MANAGE_NEWS]));
        assert!(!has_all_permissions(Some(&moderator), &[perm::USER_MANAGEMENT, perm::MANAGE_NEWS]));
        assert!(has_all_permissions(Some(&moderator), &[perm::MANAGE_NEWS, perm::HANDLE_REPORTS]));
        assert!(!has_any_permission(Some(&moderator), &[]));
        assert!(has_all_permissions(Some(&moderator), &[]));
    }

    #[test]
    fn test_admin_management() {
        let admin_a = user("a", "admin");
        let admin_b = user("b", "admin");
        let moderator = user("m", "moderator");
        assert!(can_manage_user(Some(&admin_a), Some(&admin_a)));
        assert!(!can_manage_user(Some(&admin_a), Some(&admin_b)));
        assert!(can_manage_user(Some(&admin_a), Some(&moderator)));
    }

    #[test]
    fn test_moderator_management() {
        let moderator_a = user("ma", "moderator");
        let moderator_b = user("mb", "moderator");
        let plain = user("u", "user");
        assert!(can_manage_user(Some(&moderator_a), Some(&plain)));
        assert!(!can_manage_user(Some(&moderator_a), Some(&moderator_b)));
        assert!(!can_manage_user(Some(&moderator_a), Some(&moderator_a)));
    }

    #[test]
    fn test_user_management_self_only() {
        let a = user("a", "user");
        let b = user("b", "user");
        assert!(can_manage_user(Some(&a), Some(&a)));
        assert!(!can_manage_user(Some(&a), Some(&b)));
        assert!(!can_manage_user(Some(&User::default()), Some(&User::default())));
    }

    #[test]
    fn test_management_with_absent_party() {
        let admin = user("a", "admin");
        assert!(!can_manage_user(None, Some(&admin)));
        assert!(!can_manage_user(Some(&admin), None));
        assert!(!can_manage_user(None, None));
    }

    #[test]
    fn test_authorize_distinguishes_denials() {
        assert_eq!(
            authorize(None, perm::USER_MANAGEMENT),
            PolicyDecision::Deny(Denial::Unauthenticated)
        );

        let plain = user("u", "user");
        assert_eq!(
            authorize(Some(&plain), perm::USER_MANAGEMENT),
            PolicyDecision::Deny(Denial::InsufficientRole {
                role: RoleId::User,
                permission: perm::USER_MANAGEMENT.to_string(),
            })
        );

        assert!(authorize(None, perm::VIEW_MATCHES).is_allowed());
    }

    #[test]
    fn test_enforce() {
        let admin = user("a", "admin");
        assert!(enforce(Some(&admin), perm::SYSTEM_SETTINGS).is_ok());

        let err = enforce(None, perm::SYSTEM_SETTINGS).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthenticated);

        let moderator = user("m", "moderator");
        let err = enforce(Some(&moderator), perm::SYSTEM_SETTINGS).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[test]
    fn test_access_context() {
        let multi = User::new("x").with_roles(["user", "moderator"]);
        let ctx = AccessContext::new(Some(&multi));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.primary_role(), RoleId::Moderator);
        assert!(ctx.has_minimum_role(RoleId::User));
        assert!(ctx.has_role(RoleId::User));
        assert!(ctx.has_permission(perm::MANAGE_TEAMS));
        assert!(ctx.can_manage(Some(&user("u", "user"))));

        let anonymous = AccessContext::new(None);
        assert!(!anonymous.is_authenticated());
        assert_eq!(anonymous.primary_role(), RoleId::User);
    }

    #[test]
    fn test_decision_serialization() {
        let decision = PolicyDecision::Deny(Denial::Unauthenticated);
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["decision"], "deny");
    }
}
