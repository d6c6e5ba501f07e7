//! Show how a user record resolves: primary role, landing route and badge.

use anyhow::Result;
use colored::*;
use serde::Serialize;

use rivals_access_core::rbac::{
    get_dashboard_route, get_role_badge, get_role_theme, recognized_roles, resolve_primary_role,
    DashboardRoute, RoleBadge, RoleId, RoleTheme, User,
};

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    claims: Vec<&'a str>,
    recognized_roles: Vec<RoleId>,
    primary_role: RoleId,
    dashboard_route: DashboardRoute,
    badge: RoleBadge,
    theme: RoleTheme,
}

impl<'a> InspectReport<'a> {
    fn new(user: Option<&'a User>) -> Self {
        Self {
            authenticated: user.is_some(),
            id: user.and_then(|u| u.id.as_ref()).map(|id| id.as_str()),
            name: user.and_then(|u| u.name.as_deref()),
            claims: user.map(|u| u.claims().iter().collect()).unwrap_or_default(),
            recognized_roles: recognized_roles(user),
            primary_role: resolve_primary_role(user),
            dashboard_route: get_dashboard_route(user),
            badge: get_role_badge(user),
            theme: get_role_theme(user),
        }
    }
}

pub fn execute(user: Option<&User>, format: OutputFormat) -> Result<()> {
    let report = InspectReport::new(user);

    match format {
        OutputFormat::Table => {
            output::print_header("User");
            output::print_detail(
                "Authenticated",
                if report.authenticated { "yes" } else { "no (anonymous visitor)" },
            );
            if let Some(id) = report.id {
                output::print_detail("ID", id);
            }
            if let Some(name) = report.name {
                output::print_detail("Name", name);
            }
            output::print_detail("Claims", &join_or_none(report.claims.iter().copied()));
            output::print_detail(
                "Recognized",
                &join_or_none(report.recognized_roles.iter().map(|r| r.as_str())),
            );
            output::print_detail(
                "Primary role",
                &report.primary_role.as_str().bold().to_string(),
            );
            output::print_detail("Dashboard", report.dashboard_route.as_str());
            output::print_detail(
                "Badge",
                &format!("{} {}", report.badge.icon, report.badge.text),
            );
            output::print_detail("Theme", report.theme.primary);
        }
        _ => output::print_item(&report, format)?,
    }

    Ok(())
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        joined
    }
}
