//! Role-Based Access Control (RBAC) for the community platform.
//!
//! This module provides:
//! - **Registry**: the three built-in roles (`user`, `moderator`, `admin`), their rank,
//!   presentation metadata and per-role permission lists
//! - **Resolver**: reduces a user record (single `role` or `roles` collection) to one
//!   primary role
//! - **Policy**: literal role membership, hierarchical rank checks, permission checks,
//!   denial reasons and the management-authority rule
//! - **Navigation**: menu entries, landing route and dashboard sections per user
//! - **Presentation**: badges, theme tokens and denial messages
//!
//! Every query is total: missing users, unknown roles and malformed claims
//! degrade to the least-privileged answer instead of failing.
//!
//! # Usage
//!
//! ```rust
//! use rivals_access_core::rbac::{
//!     get_dashboard_route, has_minimum_role, has_permission, permissions, RoleId, User,
//! };
//!
//! let user = User::new("42").with_roles(["moderator", "admin"]);
//!
//! assert!(has_permission(Some(&user), permissions::USER_MANAGEMENT));
//! assert!(has_minimum_role(Some(&user), RoleId::Moderator));
//! assert_eq!(get_dashboard_route(Some(&user)).as_str(), "admin-dashboard");
//! ```

pub mod models;
pub mod navigation;
pub mod permissions;
pub mod policy;
pub mod presentation;
pub mod resolver;
pub mod roles;

pub use models::{DashboardRoute, NavigationEntry, RoleBadge, RoleClaims, User, UserId};
pub use navigation::{
    can_access_section, dashboard_sections, find_section, get_dashboard_route,
    get_dashboard_sections, get_navigation_items, DashboardSection, SectionRequirement,
};
pub use policy::{
    authorize, can_manage_user, enforce, has_all_permissions, has_any_permission,
    has_minimum_role, has_permission, has_role, AccessContext, Denial, PolicyDecision,
};
pub use presentation::{
    describe_denial, get_permission_error_message, get_role_badge, get_role_theme,
    get_section_denial_message,
};
pub use resolver::{recognized_roles, resolve_primary_role};
pub use roles::{get_role_definition, role_definitions, RoleDefinition, RoleId, RoleTheme};
