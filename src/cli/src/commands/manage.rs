//! Management-authority check between the current user and a target.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use rivals_access_core::rbac::{can_manage_user, resolve_primary_role, RoleId, User};

use crate::input;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ManageArgs {
    /// Target user: inline JSON, a JSON/YAML file, or `-` for stdin
    #[arg(short, long)]
    target: String,
}

#[derive(Debug, Serialize)]
struct ManageReport {
    actor_role: Option<RoleId>,
    target_role: Option<RoleId>,
    same_user: bool,
    allowed: bool,
}

fn evaluate(actor: Option<&User>, target: Option<&User>) -> ManageReport {
    ManageReport {
        actor_role: actor.map(|u| resolve_primary_role(Some(u))),
        target_role: target.map(|u| resolve_primary_role(Some(u))),
        same_user: matches!((actor, target), (Some(a), Some(t)) if a.is_same_user(t)),
        allowed: can_manage_user(actor, target),
    }
}

pub fn execute(args: ManageArgs, actor: Option<&User>, format: OutputFormat) -> Result<()> {
    let target = input::load_user(Some(args.target.as_str())).context("Failed to load target user")?;
    let report = evaluate(actor, target.as_ref());

    match format {
        OutputFormat::Table => {
            let describe = |role: Option<RoleId>| {
                role.map_or_else(|| "anonymous".to_string(), |r| r.to_string())
            };
            let summary = format!(
                "{} acting on {}{}",
                describe(report.actor_role),
                describe(report.target_role),
                if report.same_user { " (self)" } else { "" }
            );
            if report.allowed {
                output::print_success(&summary);
            } else {
                output::print_denied(&summary);
            }
        }
        _ => output::print_item(&report, format)?,
    }

    Ok(())
}
