//! Single access checks: a permission, a literal role, or a minimum role.

use anyhow::{bail, Result};
use clap::{ArgGroup, Args};
use serde::Serialize;

use rivals_access_core::rbac::{
    authorize, describe_denial, has_minimum_role, has_role, resolve_primary_role, PolicyDecision,
    RoleId, User,
};

use crate::output::{self, OutputFormat};

#[derive(Args)]
#[command(group(ArgGroup::new("check").required(true).args(["permission", "role", "min_role"])))]
pub struct CheckArgs {
    /// Permission name (e.g. user_management)
    #[arg(short, long)]
    permission: Option<String>,

    /// Literal role membership (no hierarchy)
    #[arg(short, long)]
    role: Option<RoleId>,

    /// Minimum role by rank
    #[arg(short, long)]
    min_role: Option<RoleId>,

    /// Action wording used in the denial message
    #[arg(short, long)]
    action: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    check: &'static str,
    subject: String,
    primary_role: RoleId,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    decision: Option<PolicyDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

pub fn execute(args: CheckArgs, user: Option<&User>, format: OutputFormat) -> Result<()> {
    let report = evaluate(&args, user)?;

    match format {
        OutputFormat::Table => {
            let summary = format!("{} '{}' (primary role: {})", report.check, report.subject, report.primary_role);
            if report.allowed {
                output::print_success(&summary);
            } else {
                output::print_denied(&summary);
            }
            if let Some(message) = &report.message {
                output::print_detail("Message", message);
            }
        }
        _ => output::print_item(&report, format)?,
    }

    Ok(())
}

fn evaluate(args: &CheckArgs, user: Option<&User>) -> Result<CheckReport> {
    let primary_role = resolve_primary_role(user);

    if let Some(permission) = &args.permission {
        let decision = authorize(user, permission);
        let action = args.action.as_deref().unwrap_or_default();
        let message = decision.denial().map(|denial| describe_denial(denial, action));
        return Ok(CheckReport {
            check: "permission",
            subject: permission.clone(),
            primary_role,
            allowed: decision.is_allowed(),
            decision: Some(decision),
            message,
        });
    }

    let (check, role, allowed) = match (args.role, args.min_role) {
        (Some(role), _) => ("role", role, has_role(user, role)),
        (None, Some(role)) => ("min-role", role, has_minimum_role(user, role)),
        (None, None) => bail!("One of --permission, --role or --min-role is required"),
    };

    Ok(CheckReport {
        check,
        subject: role.to_string(),
        primary_role,
        allowed,
        decision: None,
        message: None,
    })
}
