//! Dashboard sections with their gate and whether the user passes it.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use rivals_access_core::rbac::{
    dashboard_sections, get_section_denial_message, DashboardSection, SectionRequirement, User,
};

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct SectionStatus {
    #[serde(flatten)]
    section: &'static DashboardSection,
    accessible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Tabled, Serialize)]
struct SectionRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Section")]
    name: &'static str,
    #[tabled(rename = "Requires")]
    requires: String,
    #[tabled(rename = "Access")]
    access: String,
}

fn describe_requirement(requirement: SectionRequirement) -> String {
    match requirement {
        SectionRequirement::MinimumRole(role) => format!("{} or higher", role),
        SectionRequirement::ExactRole(role) => format!("{} (exact)", role),
    }
}

fn statuses(user: Option<&User>) -> Vec<SectionStatus> {
    dashboard_sections()
        .iter()
        .map(|section| {
            let accessible = section.requirement.is_met(user);
            SectionStatus {
                section,
                accessible,
                message: (!accessible).then(|| get_section_denial_message(user, section.id)),
            }
        })
        .collect()
}

pub fn execute(user: Option<&User>, format: OutputFormat) -> Result<()> {
    let statuses = statuses(user);

    match format {
        OutputFormat::Table => {
            let rows: Vec<SectionRow> = statuses
                .iter()
                .map(|status| SectionRow {
                    id: status.section.id,
                    name: status.section.name,
                    requires: describe_requirement(status.section.requirement),
                    access: output::yes_no(status.accessible),
                })
                .collect();
            output::print_list(&rows, format)?;
        }
        _ => output::print_item(&statuses, format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivals_access_core::rbac::RoleId;

    #[test]
    fn test_moderator_statuses() {
        let moderator = User::new("m").with_role("moderator");
        let statuses = statuses(Some(&moderator));

        let closed: Vec<_> = statuses.iter().filter(|s| !s.accessible).map(|s| s.section.id).collect();
        assert_eq!(closed, vec!["users", "bulk-operations", "statistics"]);
        assert!(statuses
            .iter()
            .filter(|s| !s.accessible)
            .all(|s| s.message.as_deref().is_some_and(|m| m.contains("Admin"))));
    }

    #[test]
    fn test_describe_requirement() {
        assert_eq!(
            describe_requirement(SectionRequirement::MinimumRole(RoleId::Moderator)),
            "moderator or higher"
        );
        assert_eq!(describe_requirement(SectionRequirement::ExactRole(RoleId::Admin)), "admin (exact)");
    }

    #[test]
    fn test_status_serialization_flattens_section() {
        let json = serde_json::to_value(statuses(None)).unwrap();
        assert_eq!(json[0]["id"], "overview");
        assert_eq!(json[0]["accessible"], false);
        assert_eq!(json[0]["requirement"]["kind"], "minimum_role");
        assert_eq!(json[0]["requirement"]["role"], "moderator");
    }
}
