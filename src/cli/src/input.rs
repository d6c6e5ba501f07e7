//! Loading user records from the command line.
//!
//! A user source is one of:
//! - an inline JSON document (`'{"id": 1, "role": "admin"}'` or `null`)
//! - `-`, to read the record from stdin
//! - a path to a `.json`, `.yaml` or `.yml` file

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use rivals_access_core::rbac::User;
use rivals_access_core::telemetry::LogEventBuilder;

/// Resolve a user source into a record. `None` means an anonymous visitor.
pub fn load_user(source: Option<&str>) -> Result<Option<User>> {
    let Some(source) = source else {
        return Ok(None);
    };

    let user = parse_source(source)?;
    log_loaded(user.as_ref());
    Ok(user)
}

fn parse_source(source: &str) -> Result<Option<User>> {
    let trimmed = source.trim();

    if trimmed == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read user record from stdin")?;
        return parse_document(&buffer).context("Invalid user record on stdin");
    }

    if looks_inline(trimmed) {
        return Ok(User::from_json(trimmed).context("Invalid inline user record")?);
    }

    parse_file(Path::new(trimmed))
}

fn parse_file(path: &Path) -> Result<Option<User>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let user = if is_yaml {
        User::from_yaml(&content)
    } else {
        User::from_json(&content)
    };
    user.with_context(|| format!("Invalid user record in {}", path.display()))
}

/// Stdin carries no extension; JSON-looking input is parsed as JSON, the rest as YAML.
fn parse_document(content: &str) -> Result<Option<User>> {
    let trimmed = content.trim();
    let user = if looks_inline(trimmed) {
        User::from_json(trimmed)?
    } else {
        User::from_yaml(trimmed)?
    };
    Ok(user)
}

fn looks_inline(source: &str) -> bool {
    source.starts_with('{') || source.starts_with('[') || source == "null"
}

fn log_loaded(user: Option<&User>) {
    let Some(user) = user else {
        LogEventBuilder::debug("User source resolved to an anonymous visitor").emit();
        return;
    };

    let mut event = LogEventBuilder::debug("Loaded user record")
        .field("role", &user.role)
        .field("roles", &user.roles)
        .field("email", &user.email);
    if let Some(id) = &user.id {
        event = event.user_id(id.as_str());
    }
    event.emit();
}
