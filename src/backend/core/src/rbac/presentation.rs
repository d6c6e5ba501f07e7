//! Badge, theme and message accessors consumed by the UI layer.

use super::models::{RoleBadge, User};
use super::navigation::find_section;
use super::policy::Denial;
use super::resolver::resolve_primary_role;
use super::roles::{RoleId, RoleTheme};

const DEFAULT_ACTION: &str = "perform this action";

/// Badge for the user's primary role.
pub fn get_role_badge(user: Option<&User>) -> RoleBadge {
    let definition = resolve_primary_role(user).definition();
    RoleBadge {
        role: definition.id,
        text: definition.badge_text,
        icon: definition.icon,
        theme_class_names: definition.theme.badge,
    }
}

/// Theme tokens for the user's primary role.
pub fn get_role_theme(user: Option<&User>) -> RoleTheme {
    resolve_primary_role(user).definition().theme
}

/// Message explaining why `action` is unavailable.
///
/// Anonymous visitors are asked to log in; signed-in users are told their
/// role is insufficient.
pub fn get_permission_error_message(user: Option<&User>, attempted_action: &str) -> String {
    let action = action_or_default(attempted_action);
    match user {
        None => login_prompt(action),
        Some(_) => role_denial(resolve_primary_role(user), action),
    }
}

/// Render a [`Denial`] with the same wording as [`get_permission_error_message`].
pub fn describe_denial(denial: &Denial, attempted_action: &str) -> String {
    let action = action_or_default(attempted_action);
    match denial {
        Denial::Unauthenticated => login_prompt(action),
        Denial::InsufficientRole { role, .. } => role_denial(*role, action),
    }
}

/// Message shown when a dashboard section is closed to `user`.
pub fn get_section_denial_message(user: Option<&User>, section_id: &str) -> String {
    let required = match find_section(section_id) {
        Some(_) if resolve_primary_role(user) == RoleId::Moderator => "Admin",
        _ => "higher",
    };
    format!(
        "You don't have permission to access this section. This section requires {} privileges.",
        required
    )
}

fn action_or_default(action: &str) -> &str {
    let trimmed = action.trim();
    if trimmed.is_empty() {
        DEFAULT_ACTION
    } else {
        trimmed
    }
}

fn login_prompt(action: &str) -> String {
    format!("Please log in to {}.", action)
}

fn role_denial(role: RoleId, action: &str) -> String {
    format!(
        "Your role ({}) does not have permission to {}.",
        role.definition().display_name,
        action
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges() {
        let admin = User::new("a").with_role("admin");
        let badge = get_role_badge(Some(&admin));
        assert_eq!(badge.role, RoleId::Admin);
        assert_eq!(badge.text, "Admin");
        assert_eq!(badge.icon, "👑");
        assert!(badge.theme_class_names.contains("bg-red-100"));

        let anonymous = get_role_badge(None);
        assert_eq!(anonymous.role, RoleId::User);
        assert_eq!(anonymous.text, "User");
    }

    #[test]
    fn test_theme_tokens() {
        let moderator = User::new("m").with_roles(["moderator"]);
        let theme = get_role_theme(Some(&moderator));
        assert_eq!(theme.primary, "bg-yellow-600");
        assert_eq!(theme.primary_hover, "hover:bg-yellow-700");
        assert_eq!(get_role_theme(None).shadow, "shadow-green-500/30");
    }

    #[test]
    fn test_permission_error_messages() {
        assert_eq!(
            get_permission_error_message(None, "vote"),
            "Please log in to vote."
        );

        let moderator = User::new("m").with_role("moderator");
        assert_eq!(
            get_permission_error_message(Some(&moderator), "manage users"),
            "Your role (Moderator) does not have permission to manage users."
        );

        assert_eq!(
            get_permission_error_message(None, "   "),
            "Please log in to perform this action."
        );
    }

    #[test]
    fn test_describe_denial_matches_error_message() {
        let plain = User::new("u").with_role("user");
        let denial = Denial::InsufficientRole {
            role: RoleId::User,
            permission: "admin_panel".to_string(),
        };
        assert_eq!(
            describe_denial(&denial, "open the admin panel"),
            get_permission_error_message(Some(&plain), "open the admin panel")
        );
        assert_eq!(
            describe_denial(&Denial::Unauthenticated, "post"),
            get_permission_error_message(None, "post")
        );
    }

    #[test]
    fn test_section_denial_message() {
        let moderator = User::new("m").with_role("moderator");
        assert!(get_section_denial_message(Some(&moderator), "users").ends_with("requires Admin privileges."));

        let plain = User::new("u").with_role("user");
        assert!(get_section_denial_message(Some(&plain), "teams").ends_with("requires higher privileges."));
        assert!(get_section_denial_message(None, "teams").contains("higher"));
    }
}
