#![allow(clippy::result_large_err)]
//! # Rivals Access Core
//!
//! Role and permission resolution for the Marvel Rivals community platform.
//!
//! ## Architecture
//!
//! - **RBAC**: role registry, primary-role resolution, permission checks,
//!   navigation and dashboard derivation, management authority, badges and
//!   denial messages
//! - **Telemetry**: structured logging with personal-data redaction
//! - **Config**: layered configuration from files and environment
//! - **Error**: coded errors for the parsing and configuration boundary
//!
//! Every access query is a pure function of the user record passed in; the
//! registry is static and the crate holds no mutable state.

pub mod config;
pub mod error;
pub mod rbac;
pub mod telemetry;

pub use error::{AccessError, ErrorCode, ErrorContext, ErrorDetails, ErrorSeverity, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{AccessError, ErrorCode, ErrorContext, ErrorDetails, ErrorSeverity, Result};
    pub use crate::rbac::{
        authorize, can_access_section, can_manage_user, enforce, get_dashboard_route,
        get_dashboard_sections, get_navigation_items, get_permission_error_message,
        get_role_badge, get_role_definition, get_role_theme, get_section_denial_message,
        has_all_permissions, has_any_permission, has_minimum_role, has_permission, has_role,
        permissions, resolve_primary_role, AccessContext, DashboardRoute, DashboardSection,
        Denial, NavigationEntry, PolicyDecision, RoleBadge, RoleDefinition, RoleId, RoleTheme,
        User, UserId,
    };
    pub use crate::telemetry::{init_telemetry, LogEventBuilder, TelemetryConfig};
}
