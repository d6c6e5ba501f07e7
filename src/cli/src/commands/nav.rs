//! Navigation entries visible to a user.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use rivals_access_core::rbac::{get_dashboard_route, get_navigation_items, NavigationEntry, User};

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct NavRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Permission")]
    permission: &'static str,
}

impl From<NavigationEntry> for NavRow {
    fn from(entry: NavigationEntry) -> Self {
        Self {
            id: entry.id,
            label: entry.label,
            permission: entry.required_permission,
        }
    }
}

pub fn execute(user: Option<&User>, format: OutputFormat) -> Result<()> {
    let entries = get_navigation_items(user);

    match format {
        OutputFormat::Table => {
            let rows: Vec<NavRow> = entries.into_iter().map(NavRow::from).collect();
            output::print_list(&rows, format)?;
            output::print_detail("Landing route", get_dashboard_route(user).as_str());
        }
        _ => output::print_item(&entries, format)?,
    }

    Ok(())
}
