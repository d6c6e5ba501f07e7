//! Integration tests for role resolution and permission evaluation.

use rivals_access_core::error::ErrorCode;
use rivals_access_core::rbac::{
    authorize, can_manage_user, enforce, get_role_definition, has_all_permissions,
    has_any_permission, has_minimum_role, has_permission, has_role, permissions as perm,
    recognized_roles, resolve_primary_role, role_definitions, AccessContext, Denial,
    PolicyDecision, RoleId, User,
};

fn admin(id: &str) -> User {
    User::new(id).with_role("admin")
}

fn moderator(id: &str) -> User {
    User::new(id).with_role("moderator")
}

fn plain(id: &str) -> User {
    User::new(id).with_role("user")
}

#[test]
fn test_rank_order_is_strict_and_transitive() {
    let ranks: Vec<u8> = RoleId::all().iter().map(|r| r.rank()).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    assert!(RoleId::User < RoleId::Moderator);
    assert!(RoleId::Moderator < RoleId::Admin);
    assert!(RoleId::User < RoleId::Admin);

    for definition in role_definitions() {
        assert_eq!(definition.rank, definition.id.rank());
    }
}

#[test]
fn test_resolve_primary_role_defaults() {
    assert_eq!(resolve_primary_role(None), RoleId::User);
    assert_eq!(resolve_primary_role(Some(&User::default())), RoleId::User);
}

#[test]
fn test_resolve_primary_role_highest_rank_wins() {
    let a = User::new("1").with_roles(["moderator", "admin"]);
    let b = User::new("1").with_roles(["admin", "moderator"]);
    assert_eq!(resolve_primary_role(Some(&a)), RoleId::Admin);
    assert_eq!(resolve_primary_role(Some(&b)), RoleId::Admin);
}

#[test]
fn test_resolve_primary_role_drops_unrecognized() {
    let bogus = User::new("1").with_roles(["bogus"]);
    assert_eq!(resolve_primary_role(Some(&bogus)), RoleId::User);

    let mixed = User::new("1").with_roles(["bogus", "moderator", "Admin"]);
    assert_eq!(resolve_primary_role(Some(&mixed)), RoleId::Moderator);
    assert_eq!(recognized_roles(Some(&mixed)), vec![RoleId::Moderator]);
}

#[test]
fn test_roles_take_precedence_over_role() {
    let user = User::new("1").with_role("admin").with_roles(Vec::<String>::new());
    assert_eq!(resolve_primary_role(Some(&user)), RoleId::User);
    assert!(!has_role(Some(&user), RoleId::Admin));
}

#[test]
fn test_non_array_roles_falls_back_to_role() {
    let user = User::from_json(r#"{"id": 9, "role": "admin", "roles": "moderator"}"#)
        .unwrap()
        .unwrap();

    assert_eq!(resolve_primary_role(Some(&user)), RoleId::Admin);
    assert_eq!(recognized_roles(Some(&user)), vec![RoleId::Admin]);
    assert!(has_role(Some(&user), RoleId::Admin));
    assert!(!has_role(Some(&user), RoleId::Moderator));
}

#[test]
fn test_has_role_is_literal() {
    let m = moderator("m");
    assert!(!has_role(Some(&m), RoleId::User));
    assert!(has_role(Some(&m), RoleId::Moderator));
    assert!(!has_role(None, RoleId::User));
}

#[test]
fn test_has_minimum_role_is_hierarchical() {
    assert!(has_minimum_role(Some(&moderator("m")), RoleId::User));
    assert!(!has_minimum_role(Some(&plain("u")), RoleId::Moderator));
    assert!(has_minimum_role(None, RoleId::User));
    assert!(!has_minimum_role(None, RoleId::Moderator));
}

#[test]
fn test_permission_sets_are_per_role() {
    assert!(has_permission(Some(&admin("a")), perm::USER_MANAGEMENT));
    assert!(!has_permission(Some(&moderator("m")), perm::USER_MANAGEMENT));

    // Non-cumulative: higher roles do not inherit every lower-role permission.
    assert!(has_permission(Some(&plain("u")), perm::REPORT_CONTENT));
    assert!(!has_permission(Some(&moderator("m")), perm::REPORT_CONTENT));
    assert!(!has_permission(Some(&admin("a")), perm::MODERATION_PANEL));

    assert!(!has_permission(Some(&admin("a")), "launch_missiles"));
}

#[test]
fn test_any_and_all_permissions() {
    let m = moderator("m");
    assert!(has_any_permission(Some(&m), &[perm::USER_MANAGEMENT, perm::HANDLE_REPORTS]));
    assert!(!has_all_permissions(Some(&m), &[perm::USER_MANAGEMENT, perm::HANDLE_REPORTS]));
    assert!(has_all_permissions(Some(&m), &[perm::HANDLE_REPORTS, perm::MANAGE_NEWS]));

    assert!(!has_any_permission(Some(&m), &[]));
    assert!(has_all_permissions(Some(&m), &[]));
}

#[test]
fn test_can_manage_user_matrix() {
    let admin_a = admin("a");
    let admin_b = admin("b");
    let moderator_a = moderator("ma");
    let moderator_b = moderator("mb");
    let user_a = plain("ua");
    let user_b = plain("ub");

    assert!(can_manage_user(Some(&admin_a), Some(&admin_a)));
    assert!(!can_manage_user(Some(&admin_a), Some(&admin_b)));
    assert!(can_manage_user(Some(&admin_a), Some(&moderator_a)));
    assert!(can_manage_user(Some(&moderator_a), Some(&user_b)));
    assert!(!can_manage_user(Some(&moderator_a), Some(&moderator_b)));
    assert!(!can_manage_user(Some(&moderator_a), Some(&admin_a)));
    assert!(can_manage_user(Some(&user_a), Some(&user_a)));
    assert!(!can_manage_user(Some(&user_a), Some(&user_b)));
}

#[test]
fn test_can_manage_user_fails_closed() {
    let a = admin("a");
    assert!(!can_manage_user(None, Some(&a)));
    assert!(!can_manage_user(Some(&a), None));
    assert!(!can_manage_user(None, None));

    // Without ids there is no "same user".
    let anonymous_user = User::default().with_role("user");
    assert!(!can_manage_user(Some(&anonymous_user), Some(&anonymous_user)));
    let anonymous_admin = User::default().with_role("admin");
    assert!(!can_manage_user(Some(&anonymous_admin), Some(&anonymous_admin.clone())));
}

#[test]
fn test_numeric_and_string_ids_match() {
    let from_number = User::from_json(r#"{"id": 42, "role": "user"}"#).unwrap().unwrap();
    let from_string = User::from_json(r#"{"id": "42", "role": "user"}"#).unwrap().unwrap();
    assert!(can_manage_user(Some(&from_number), Some(&from_string)));
}

#[test]
fn test_authorize_denial_reasons() {
    assert_eq!(authorize(None, perm::VIEW_FORUMS), PolicyDecision::Allow);
    assert_eq!(
        authorize(None, perm::USER_MANAGEMENT),
        PolicyDecision::Deny(Denial::Unauthenticated)
    );
    assert_eq!(
        authorize(Some(&plain("u")), perm::USER_MANAGEMENT),
        PolicyDecision::Deny(Denial::InsufficientRole {
            role: RoleId::User,
            permission: perm::USER_MANAGEMENT.to_string(),
        })
    );
}

#[test]
fn test_enforce_error_codes() {
    assert!(enforce(Some(&admin("a")), perm::BULK_OPERATIONS).is_ok());
    assert_eq!(
        enforce(None, perm::BULK_OPERATIONS).unwrap_err().code(),
        ErrorCode::Unauthenticated
    );
    assert_eq!(
        enforce(Some(&moderator("m")), perm::BULK_OPERATIONS).unwrap_err().code(),
        ErrorCode::Forbidden
    );
}

#[test]
fn test_access_context_agrees_with_free_functions() {
    let users = [
        None,
        Some(admin("a")),
        Some(moderator("m")),
        Some(plain("u")),
        Some(User::new("x").with_roles(["moderator", "admin"])),
    ];

    for user in &users {
        let user = user.as_ref();
        let ctx = AccessContext::new(user);
        assert_eq!(ctx.primary_role(), resolve_primary_role(user));
        for role in RoleId::all() {
            assert_eq!(ctx.has_role(role), has_role(user, role));
            assert_eq!(ctx.has_minimum_role(role), has_minimum_role(user, role));
        }
        for definition in role_definitions() {
            for permission in definition.permissions {
                assert_eq!(ctx.has_permission(permission), has_permission(user, permission));
            }
        }
    }
}

#[test]
fn test_unknown_role_definition_falls_back() {
    assert_eq!(get_role_definition("superuser").id, RoleId::User);
    assert_eq!(get_role_definition("moderator").id, RoleId::Moderator);
}

#[test]
fn test_evaluators_are_idempotent() {
    let user = User::new("7").with_roles(["moderator", "bogus"]);
    let target = plain("8");

    for _ in 0..2 {
        assert_eq!(resolve_primary_role(Some(&user)), RoleId::Moderator);
        assert!(has_permission(Some(&user), perm::HANDLE_REPORTS));
        assert!(can_manage_user(Some(&user), Some(&target)));
    }
    assert_eq!(
        authorize(Some(&user), perm::ADMIN_PANEL),
        authorize(Some(&user), perm::ADMIN_PANEL)
    );
}
