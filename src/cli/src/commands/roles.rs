//! Role registry commands.

use anyhow::Result;
use clap::Args;
use colored::*;
use serde::Serialize;
use tabled::Tabled;

use rivals_access_core::rbac::{role_definitions, RoleDefinition, RoleId};

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct RolesArgs {
    /// Show one role in detail (user, moderator or admin)
    role: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    #[tabled(rename = "ID")]
    id: RoleId,
    #[tabled(rename = "Rank")]
    rank: u8,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Badge")]
    badge: String,
    #[tabled(rename = "Permissions")]
    permissions: usize,
}

impl From<&RoleDefinition> for RoleRow {
    fn from(definition: &RoleDefinition) -> Self {
        Self {
            id: definition.id,
            rank: definition.rank,
            name: definition.display_name,
            badge: format!("{} {}", definition.icon, definition.badge_text),
            permissions: definition.permissions.len(),
        }
    }
}

pub fn execute(args: RolesArgs, format: OutputFormat) -> Result<()> {
    let Some(role) = args.role else {
        let rows: Vec<RoleRow> = role_definitions().iter().map(RoleRow::from).collect();
        return match format {
            OutputFormat::Table => output::print_list(&rows, format),
            _ => output::print_item(role_definitions(), format),
        };
    };

    let definition = role.parse::<RoleId>()?.definition();

    match format {
        OutputFormat::Table => {
            output::print_header(&format!("{} {}", definition.icon, definition.display_name));
            output::print_detail("ID", definition.id.as_str());
            output::print_detail("Rank", &definition.rank.to_string());
            output::print_detail("Badge", definition.badge_text);
            output::print_detail("Theme", definition.theme.primary);
            println!();
            println!("  {}", "Permissions".cyan());
            for permission in definition.permissions {
                println!("    - {}", permission);
            }
        }
        _ => output::print_item(definition, format)?,
    }

    Ok(())
}
