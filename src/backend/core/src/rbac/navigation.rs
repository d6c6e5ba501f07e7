//! Navigation, landing-route and dashboard-section derivation.

use serde::Serialize;

use super::models::{DashboardRoute, NavigationEntry, User};
use super::permissions as perm;
use super::policy::{has_minimum_role, has_permission, has_role};
use super::resolver::resolve_primary_role;
use super::roles::RoleId;

const BASE_ENTRIES: [NavigationEntry; 4] = [
    NavigationEntry { id: "forums", label: "Forums", required_permission: perm::VIEW_FORUMS },
    NavigationEntry { id: "matches", label: "Matches", required_permission: perm::VIEW_MATCHES },
    NavigationEntry { id: "events", label: "Events", required_permission: perm::VIEW_EVENTS },
    NavigationEntry { id: "rankings", label: "Rankings", required_permission: perm::VIEW_RANKINGS },
];

const ADMIN_ENTRIES: [NavigationEntry; 4] = [
    NavigationEntry { id: "admin-dashboard", label: "Admin Panel", required_permission: perm::ADMIN_PANEL },
    NavigationEntry { id: "admin-users", label: "Users", required_permission: perm::USER_MANAGEMENT },
    NavigationEntry { id: "admin-statistics", label: "Statistics", required_permission: perm::VIEW_ANALYTICS },
    NavigationEntry {
        id: "admin-bulk-operations",
        label: "Bulk Operations",
        required_permission: perm::BULK_OPERATIONS,
    },
];

const MODERATOR_ENTRIES: [NavigationEntry; 3] = [
    NavigationEntry { id: "moderator-dashboard", label: "Moderation", required_permission: perm::MODERATION_PANEL },
    NavigationEntry { id: "moderator-reports", label: "Reports", required_permission: perm::HANDLE_REPORTS },
    NavigationEntry { id: "moderator-news", label: "News Management", required_permission: perm::MANAGE_NEWS },
];

/// Ordered navigation entries visible to `user`.
///
/// Role-specific entries are appended to the base list (admin entries take
/// precedence over moderator entries), then every entry, base entries
/// included, must pass [`has_permission`].
pub fn get_navigation_items(user: Option<&User>) -> Vec<NavigationEntry> {
    let mut entries: Vec<NavigationEntry> = BASE_ENTRIES.to_vec();

    if has_minimum_role(user, RoleId::Admin) {
        entries.extend_from_slice(&ADMIN_ENTRIES);
    } else if has_minimum_role(user, RoleId::Moderator) {
        entries.extend_from_slice(&MODERATOR_ENTRIES);
    }

    entries.retain(|entry| has_permission(user, entry.required_permission));
    entries
}

/// The landing page for `user`, by primary role.
pub fn get_dashboard_route(user: Option<&User>) -> DashboardRoute {
    match resolve_primary_role(user) {
        RoleId::Admin => DashboardRoute::AdminDashboard,
        RoleId::Moderator => DashboardRoute::ModeratorDashboard,
        RoleId::User => DashboardRoute::UserDashboard,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Dashboard sections
// ═══════════════════════════════════════════════════════════════════════════════

/// How a dashboard section is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "role", rename_all = "snake_case")]
pub enum SectionRequirement {
    /// Hierarchical: [`has_minimum_role`].
    MinimumRole(RoleId),
    /// Literal membership: [`has_role`].
    ExactRole(RoleId),
}

impl SectionRequirement {
    pub fn is_met(&self, user: Option<&User>) -> bool {
        match *self {
            Self::MinimumRole(role) => has_minimum_role(user, role),
            Self::ExactRole(role) => has_role(user, role),
        }
    }
}

/// A section of the moderation/administration dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSection {
    pub id: &'static str,
    pub name: &'static str,
    pub requirement: SectionRequirement,
}

const MODERATOR_UP: SectionRequirement = SectionRequirement::MinimumRole(RoleId::Moderator);
const ADMIN_ONLY: SectionRequirement = SectionRequirement::ExactRole(RoleId::Admin);

static DASHBOARD_SECTIONS: [DashboardSection; 10] = [
    DashboardSection { id: "overview", name: "Overview", requirement: MODERATOR_UP },
    DashboardSection { id: "teams", name: "Teams", requirement: MODERATOR_UP },
    DashboardSection { id: "players", name: "Players", requirement: MODERATOR_UP },
    DashboardSection { id: "matches", name: "Matches", requirement: MODERATOR_UP },
    DashboardSection { id: "events", name: "Events", requirement: MODERATOR_UP },
    DashboardSection { id: "users", name: "Users", requirement: ADMIN_ONLY },
    DashboardSection { id: "news", name: "News", requirement: MODERATOR_UP },
    DashboardSection { id: "forums", name: "Forums", requirement: MODERATOR_UP },
    DashboardSection { id: "bulk-operations", name: "Bulk Ops", requirement: ADMIN_ONLY },
    DashboardSection { id: "statistics", name: "Statistics", requirement: ADMIN_ONLY },
];

/// Every dashboard section, in display order.
pub fn dashboard_sections() -> &'static [DashboardSection] {
    &DASHBOARD_SECTIONS
}

/// Look up a section by id.
pub fn find_section(section_id: &str) -> Option<&'static DashboardSection> {
    DASHBOARD_SECTIONS.iter().find(|s| s.id == section_id)
}

/// Whether `user` may open the section. Unknown sections are closed.
pub fn can_access_section(user: Option<&User>, section_id: &str) -> bool {
    find_section(section_id).is_some_and(|section| section.requirement.is_met(user))
}

/// The sections `user` may open, in display order.
pub fn get_dashboard_sections(user: Option<&User>) -> Vec<&'static DashboardSection> {
    DASHBOARD_SECTIONS
        .iter()
        .filter(|section| section.requirement.is_met(user))
        .collect()
}
