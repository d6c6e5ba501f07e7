//! Reduces a user record to its primary role.

use tracing::trace;

use super::models::{RoleClaims, User};
use super::roles::RoleId;

/// Compute the single highest-ranked role a user holds.
///
/// Absent users, empty or unrecognized claims all resolve to [`RoleId::User`].
/// When `roles` is present it is authoritative and `role` is not consulted.
pub fn resolve_primary_role(user: Option<&User>) -> RoleId {
    match RoleClaims::of(user) {
        RoleClaims::Many(list) => list
            .iter()
            .filter_map(|claimed| parse_claim(claimed))
            .max()
            .unwrap_or_default(),
        RoleClaims::Single(claimed) => parse_claim(claimed).unwrap_or_default(),
        RoleClaims::Absent => RoleId::default(),
    }
}

/// The recognized roles a user claims, de-duplicated, in ascending rank.
pub fn recognized_roles(user: Option<&User>) -> Vec<RoleId> {
    let mut roles: Vec<RoleId> = RoleClaims::of(user)
        .iter()
        .filter_map(parse_claim)
        .collect();
    roles.sort_unstable();
    roles.dedup();
    roles
}

fn parse_claim(claimed: &str) -> Option<RoleId> {
    let parsed = RoleId::parse(claimed);
    if parsed.is_none() {
        trace!(role = claimed, "Ignoring unrecognized role claim");
    }
    parsed
}
