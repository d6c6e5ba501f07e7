//! Permission names.
//!
//! These strings are matched verbatim by UI gates and other services, so they
//! must never be renamed.

// Browsing
pub const VIEW_FORUMS: &str = "view_forums";
pub const VIEW_MATCHES: &str = "view_matches";
pub const VIEW_EVENTS: &str = "view_events";
pub const VIEW_RANKINGS: &str = "view_rankings";

// Community participation
pub const CREATE_THREADS: &str = "create_threads";
pub const POST_REPLIES: &str = "post_replies";
pub const VOTE: &str = "vote";
pub const EDIT_OWN_PROFILE: &str = "edit_own_profile";
pub const REPORT_CONTENT: &str = "report_content";

// Moderation
pub const MODERATION_PANEL: &str = "moderation_panel";
pub const MODERATE_FORUMS: &str = "moderate_forums";
pub const MODERATE_COMMENTS: &str = "moderate_comments";
pub const HANDLE_REPORTS: &str = "handle_reports";
pub const VIEW_MODERATION_LOGS: &str = "view_moderation_logs";

// Content management
pub const MANAGE_NEWS: &str = "manage_news";
pub const MANAGE_MATCHES: &str = "manage_matches";
pub const MANAGE_EVENTS: &str = "manage_events";
pub const MANAGE_TEAMS: &str = "manage_teams";
pub const MANAGE_PLAYERS: &str = "manage_players";

// Administration
pub const ADMIN_PANEL: &str = "admin_panel";
pub const USER_MANAGEMENT: &str = "user_management";
pub const ROLE_MANAGEMENT: &str = "role_management";
pub const BULK_OPERATIONS: &str = "bulk_operations";
pub const VIEW_ANALYTICS: &str = "view_analytics";
pub const SYSTEM_SETTINGS: &str = "system_settings";
